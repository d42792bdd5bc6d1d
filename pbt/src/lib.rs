//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// リクエスト生成 Strategy
// ========================================

/// HTTP トークン文字 (RFC 7230)
fn token_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        prop::char::range('0', '9'),
        Just('-'),
        Just('_'),
        Just('.'),
    ]
}

fn token_string(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(token_char(), 1..=max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// HTTP メソッド
pub fn http_method() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("GET".to_string()),
        Just("POST".to_string()),
        Just("PUT".to_string()),
        Just("DELETE".to_string()),
        Just("HEAD".to_string()),
        Just("OPTIONS".to_string()),
        Just("PATCH".to_string()),
    ]
}

/// リクエストパス (スペースや CRLF を含まない)
pub fn request_path() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        "/[a-zA-Z0-9/_.-]{1,64}".prop_map(|s| s),
    ]
}

/// HTTP バージョン
pub fn http_version() -> impl Strategy<Value = String> {
    prop_oneof![Just("HTTP/1.1".to_string()), Just("HTTP/1.0".to_string())]
}

/// HTTP ヘッダー名
///
/// `Content-Length` を部分文字列として含む名前は除外する。
/// アキュムレーターはヘッダーバイト列をリテラル検索するため、
/// 生成した名前が偶然リテラルに一致するとボディ長の宣言が
/// 生成器の意図とずれてしまう。
pub fn header_name() -> impl Strategy<Value = String> {
    token_string(32).prop_filter("must not collide with Content-Length", |name| {
        !name.contains("Content-Length")
    })
}

/// HTTP ヘッダー値
///
/// 前後の空白は格納時に除去されるため、比較を単純に保つよう
/// スペース/タブを含まない文字だけで生成する。除去の検証は
/// 専用のプロパティで行う。
pub fn header_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.,;=-]{0,64}".prop_map(|s| s)
}

/// ヘッダーのリスト
pub fn headers() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec((header_name(), header_value()), 0..8)
}

/// ボディ (任意のバイト列)
pub fn body() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..256)
}

// ========================================
// ワイヤ形式の組み立て
// ========================================

/// リクエストフレームを組み立てる
///
/// `Content-Length` はボディ長から常に付与する。
pub fn encode_request_frame(
    method: &str,
    path: &str,
    version: &str,
    headers: &[(String, String)],
    body: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::new();

    buf.extend_from_slice(method.as_bytes());
    buf.push(b' ');
    buf.extend_from_slice(path.as_bytes());
    buf.push(b' ');
    buf.extend_from_slice(version.as_bytes());
    buf.extend_from_slice(b"\r\n");

    for (name, value) in headers {
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"Content-Length: ");
    buf.extend_from_slice(body.len().to_string().as_bytes());
    buf.extend_from_slice(b"\r\n");

    buf.extend_from_slice(b"\r\n");
    buf.extend_from_slice(body);

    buf
}
