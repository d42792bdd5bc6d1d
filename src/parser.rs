//! HTTP/1.x リクエストパーサー
//!
//! フレームが揃ったバイト列を構造化されたリクエストに変換する。
//! パーサーは状態を持たず、呼び出しごとに独立している。
//!
//! リクエストライン (メソッド/パス/バージョン) とボディは入力バッファへの
//! 借用ビューとして返す。ヘッダーはパース後もリストとして保持されるため、
//! 所有コピーとして返す。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_http1_framing::parse_request;
//!
//! let frame = b"POST /api HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
//! let request = parse_request(frame).unwrap();
//! assert_eq!(request.request_line.method, b"POST");
//! assert_eq!(request.request_line.path, b"/api");
//! assert_eq!(request.body, b"hello");
//! ```

use crate::error::Error;

/// リクエストライン
///
/// 各フィールドはフレームバッファへの借用ビュー。テキストとしての解釈は
/// 遅延され、`method_str()` 等を呼んだときにのみ UTF-8 として検査される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    /// HTTP メソッド (GET, POST, etc.)
    pub method: &'a [u8],
    /// リクエストパス
    pub path: &'a [u8],
    /// HTTP バージョン (HTTP/1.1 等)
    pub version: &'a [u8],
}

impl<'a> RequestLine<'a> {
    /// メソッドを UTF-8 文字列として取得
    pub fn method_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.method).ok()
    }

    /// パスを UTF-8 文字列として取得
    pub fn path_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.path).ok()
    }

    /// バージョンを UTF-8 文字列として取得
    pub fn version_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.version).ok()
    }
}

/// HTTP ヘッダー
///
/// 名前と値は前後のスペース/タブを除去した所有コピー。
/// 格納時に大文字小文字の正規化は行わない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// ヘッダー名
    pub name: Vec<u8>,
    /// ヘッダー値
    pub value: Vec<u8>,
}

impl Header {
    /// ヘッダー名を UTF-8 文字列として取得
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.name).ok()
    }

    /// ヘッダー値を UTF-8 文字列として取得
    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }
}

/// パース済みリクエスト
///
/// `request_line` と `body` は入力バッファへの借用ビューで、バッファが
/// 変更されない間のみ有効。`headers` は出現順を保持した所有コピー。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest<'a> {
    /// リクエストライン
    pub request_line: RequestLine<'a>,
    /// ヘッダー (出現順、重複排除なし)
    pub headers: Vec<Header>,
    /// ボディ
    pub body: &'a [u8],
}

impl ParsedRequest<'_> {
    /// ヘッダーを取得 (大文字小文字を区別しない)
    pub fn get_header(&self, name: &str) -> Option<&[u8]> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name.as_bytes()))
            .map(|h| h.value.as_slice())
    }

    /// 指定した名前のヘッダーをすべて取得
    pub fn get_headers(&self, name: &str) -> Vec<&[u8]> {
        self.headers
            .iter()
            .filter(|h| h.name.eq_ignore_ascii_case(name.as_bytes()))
            .map(|h| h.value.as_slice())
            .collect()
    }

    /// ヘッダーが存在するか確認
    pub fn has_header(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|h| h.name.eq_ignore_ascii_case(name.as_bytes()))
    }

    /// ボディ長の決定に使われた `Content-Length` の値を取得
    ///
    /// 名前が完全一致 (`Content-Length`) し、かつ値が数値として解釈できる
    /// 最初のヘッダーの値を返す。該当がなければ `None`。
    pub fn content_length(&self) -> Option<usize> {
        resolve_content_length(&self.headers)
    }
}

/// フレーム 1 個分のバイト列をリクエストにパース
///
/// アキュムレーターが `Complete` と判定したバイト列を渡すことを想定して
/// いるが、単独でも呼び出せるため、ヘッダー終端の欠落は防御的に
/// `Error::MissingHeaderTerminator` として検出する。
///
/// 宣言されたボディ長を超える末尾のバイト (パイプラインされた次の
/// リクエスト等) は捨てられ、保持されない。
pub fn parse_request(buffer: &[u8]) -> Result<ParsedRequest<'_>, Error> {
    if buffer.is_empty() {
        return Err(Error::EmptyInput);
    }

    let header_end = find_header_terminator(buffer).ok_or(Error::MissingHeaderTerminator)?;
    let header_section = &buffer[..header_end];
    let remainder = &buffer[header_end + 4..];

    // リクエストライン: ヘッダー部の最初の行 (CRLF がなければ全体)
    let (line, header_lines) = match find_crlf(header_section) {
        Some(pos) => (&header_section[..pos], &header_section[pos + 2..]),
        None => (header_section, &header_section[header_section.len()..]),
    };
    if line.is_empty() {
        return Err(Error::EmptyInput);
    }
    let request_line = parse_request_line(line)?;

    let headers = parse_header_lines(header_lines);

    let body = match resolve_content_length(&headers) {
        Some(len) if len > 0 => {
            if len <= remainder.len() {
                &remainder[..len]
            } else {
                // 宣言より短い場合は残り全体をボディとして返す
                remainder
            }
        }
        _ => &remainder[..0],
    };

    Ok(ParsedRequest {
        request_line,
        headers,
        body,
    })
}

/// リクエストラインをパース
///
/// 最初の 2 個のスペースで method / path / version に分割する。
/// version にスペースが含まれていてもそのまま残す。
fn parse_request_line(line: &[u8]) -> Result<RequestLine<'_>, Error> {
    let malformed = || Error::MalformedRequestLine(String::from_utf8_lossy(line).into_owned());

    let first = line.iter().position(|&b| b == b' ').ok_or_else(malformed)?;
    let rest = &line[first + 1..];
    let second = rest.iter().position(|&b| b == b' ').ok_or_else(malformed)?;

    Ok(RequestLine {
        method: &line[..first],
        path: &rest[..second],
        version: &rest[second + 1..],
    })
}

/// ヘッダー行をパース
///
/// 空行が現れた時点で打ち切る。コロンを含まない行、およびコロンが
/// 先頭にある行は拒否せず黙って読み飛ばす。
fn parse_header_lines(section: &[u8]) -> Vec<Header> {
    let mut headers = Vec::new();
    let mut rest = section;

    while !rest.is_empty() {
        let (line, next) = match find_crlf(rest) {
            Some(pos) => (&rest[..pos], &rest[pos + 2..]),
            None => (rest, &rest[rest.len()..]),
        };
        if line.is_empty() {
            break;
        }
        if let Some(header) = parse_header_line(line) {
            headers.push(header);
        }
        rest = next;
    }

    headers
}

/// ヘッダー行 1 行をパース
fn parse_header_line(line: &[u8]) -> Option<Header> {
    let colon = line.iter().position(|&b| b == b':')?;
    if colon == 0 {
        return None;
    }
    Some(Header {
        name: trim_space_tab(&line[..colon]).to_vec(),
        value: trim_space_tab(&line[colon + 1..]).to_vec(),
    })
}

/// ボディ長の決定
///
/// 名前が完全一致 (`Content-Length`) し、かつ値が数値として解釈できる
/// 最初のヘッダーを採用する。
fn resolve_content_length(headers: &[Header]) -> Option<usize> {
    headers
        .iter()
        .filter(|h| h.name == b"Content-Length")
        .find_map(|h| std::str::from_utf8(&h.value).ok()?.parse().ok())
}

/// 前後のスペースとタブを除去
fn trim_space_tab(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|&b| b != b' ' && b != b'\t')
        .map_or(start, |p| p + 1);
    &bytes[start..end]
}

/// ヘッダー終端 (`\r\n\r\n`) の開始位置を探す
fn find_header_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// CRLF の位置を探す
fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}
