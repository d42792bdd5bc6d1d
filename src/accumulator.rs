//! HTTP/1.x リクエストアキュムレーター
//!
//! Sans I/O 設計に基づくストリーミングバッファリング層を提供。
//! トランスポートから受け取った任意サイズのチャンクを蓄積し、
//! 1 リクエスト分のフレームが揃ったかどうかを判定する。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_http1_framing::{AccumulateStatus, RequestAccumulator};
//!
//! let mut accumulator = RequestAccumulator::new();
//!
//! // チャンクを投入 (サイズは任意、1 バイトずつでもよい)
//! let status = accumulator
//!     .accumulate(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n")
//!     .unwrap();
//! assert_eq!(status, AccumulateStatus::Complete);
//!
//! // フレーム全体を取得してパーサーに渡す
//! let frame = accumulator.accumulated_data();
//! assert!(frame.ends_with(b"\r\n\r\n"));
//!
//! // 同じ接続で次のフレームを読む前に必ずリセットする
//! // accumulator.reset();
//! ```

use crate::error::Error;
use crate::limits::AccumulatorLimits;

/// `Content-Length` ヘッダー検出用のリテラル
///
/// 大文字小文字は区別し、コロンの後のスペースは 1 個のみ認識する。
const CONTENT_LENGTH_PREFIX: &[u8] = b"Content-Length: ";

/// ヘッダー終端 (`\r\n\r\n`)
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// 蓄積結果
///
/// 状態ではなく戻り値。`Complete` を返した後もアキュムレーターは
/// `ReadingBody` 状態のままで、`reset()` まで遷移しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulateStatus {
    /// フレームが未完成 (続きのチャンクが必要)
    NeedMoreData,
    /// 1 リクエスト分のフレームが揃った
    Complete,
}

/// アキュムレーターの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorState {
    /// ヘッダー終端待ち (初期状態)
    ReadingHeaders,
    /// ボディ読み取り中
    ReadingBody,
}

/// HTTP/1.x リクエストアキュムレーター (Sans I/O)
///
/// 接続ごとに 1 インスタンスを所有し、`reset()` を挟んで複数フレームに
/// 再利用する。内部バッファは蓄積中は増加のみ行い、`reset()` で空に戻る
/// (確保済み容量は維持される)。
///
/// `accumulated_data()` が返すビューは次の `accumulate()` / `reset()` で
/// 無効になる。このライフタイムは借用として表現されており、コンパイル時に
/// 強制される。
#[derive(Debug)]
pub struct RequestAccumulator {
    buf: Vec<u8>,
    state: AccumulatorState,
    /// ヘッダー終端の開始オフセット (ReadingBody でのみ有効)
    header_end: usize,
    /// `Content-Length` の値。`None` は「ヘッダーなし、または数値として
    /// 解釈できない」を表し、その場合ボディは待たない。
    content_length: Option<usize>,
    limits: AccumulatorLimits,
}

impl Default for RequestAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestAccumulator {
    /// デフォルト制限 (最大 10MB) でアキュムレーターを作成
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            state: AccumulatorState::ReadingHeaders,
            header_end: 0,
            content_length: None,
            limits: AccumulatorLimits::default(),
        }
    }

    /// 制限付きでアキュムレーターを作成
    ///
    /// `max_buffer_size` が 0 の場合は `Error::Configuration` を返す。
    pub fn with_limits(limits: AccumulatorLimits) -> Result<Self, Error> {
        if limits.max_buffer_size == 0 {
            return Err(Error::Configuration(
                "max_buffer_size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            buf: Vec::new(),
            state: AccumulatorState::ReadingHeaders,
            header_end: 0,
            content_length: None,
            limits,
        })
    }

    /// 制限設定を取得
    pub fn limits(&self) -> &AccumulatorLimits {
        &self.limits
    }

    /// チャンクを蓄積してフレームの完成を判定
    ///
    /// `chunk` は任意の長さ (0 バイトや 1 バイトでもよい)。
    /// 蓄積後の総量が制限を超える場合は `Error::CapacityExceeded` を返し、
    /// そのチャンクは一切追加しない (既に受理済みのバイトは巻き戻さない)。
    /// このエラーは接続にとって致命的で、インスタンスの再利用はできない。
    pub fn accumulate(&mut self, chunk: &[u8]) -> Result<AccumulateStatus, Error> {
        let new_size = self.buf.len() + chunk.len();
        if new_size > self.limits.max_buffer_size {
            return Err(Error::CapacityExceeded {
                size: new_size,
                limit: self.limits.max_buffer_size,
            });
        }
        self.buf.extend_from_slice(chunk);

        if self.state == AccumulatorState::ReadingHeaders {
            match find_header_terminator(&self.buf) {
                Some(pos) => {
                    self.header_end = pos;
                    self.content_length = scan_content_length(&self.buf[..pos]);
                    self.state = AccumulatorState::ReadingBody;
                }
                None => return Ok(AccumulateStatus::NeedMoreData),
            }
        }

        Ok(self.body_status())
    }

    /// ボディの完成判定
    ///
    /// ヘッダー終端発見後にのみ意味を持つ。`Content-Length` が
    /// ない/解釈できない場合はボディを待たず即座に完成とする。
    fn body_status(&self) -> AccumulateStatus {
        match self.content_length {
            None => AccumulateStatus::Complete,
            Some(len) => {
                let required = self
                    .header_end
                    .saturating_add(HEADER_TERMINATOR.len())
                    .saturating_add(len);
                if self.buf.len() >= required {
                    AccumulateStatus::Complete
                } else {
                    AccumulateStatus::NeedMoreData
                }
            }
        }
    }

    /// 蓄積済みデータ全体の読み取り専用ビューを取得
    ///
    /// 次の `accumulate()` / `reset()` で無効になる。
    pub fn accumulated_data(&self) -> &[u8] {
        &self.buf
    }

    /// 蓄積済みバイト数を取得
    pub fn bytes_accumulated(&self) -> usize {
        self.buf.len()
    }

    /// ヘッダー終端を発見済みかどうか
    pub fn has_headers(&self) -> bool {
        self.state != AccumulatorState::ReadingHeaders
    }

    /// 期待するボディ長を取得
    ///
    /// `None` は「`Content-Length` ヘッダーなし、または数値として
    /// 解釈できない」を表す。ヘッダー終端発見前は常に `None`。
    pub fn expected_body_length(&self) -> Option<usize> {
        self.content_length
    }

    /// 現在の状態を取得
    pub fn current_state(&self) -> AccumulatorState {
        self.state
    }

    /// アキュムレーターをリセット
    ///
    /// バッファを空にし (容量は解放しない)、状態を `ReadingHeaders` に、
    /// `Content-Length` を未設定に戻す。同じ接続で次のフレームを読む前に
    /// 必ず呼ぶこと。呼び忘れは次フレームのパースを壊すが、自動では
    /// 検出されない。
    pub fn reset(&mut self) {
        self.buf.clear();
        self.state = AccumulatorState::ReadingHeaders;
        self.header_end = 0;
        self.content_length = None;
    }
}

/// ヘッダー終端 (`\r\n\r\n`) の開始位置を探す
fn find_header_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}

/// ヘッダーバイト列から `Content-Length` の値を読み取る
///
/// 完全一致の `Content-Length: ` リテラルを探し、その直後から次の
/// `\r` (なければヘッダー部の終わり) までを数値として解釈する。
/// 見つからない場合や解釈できない場合は `None`。
fn scan_content_length(header_bytes: &[u8]) -> Option<usize> {
    let pos = find_subslice(header_bytes, CONTENT_LENGTH_PREFIX)?;
    let rest = &header_bytes[pos + CONTENT_LENGTH_PREFIX.len()..];
    let value_end = rest.iter().position(|&b| b == b'\r').unwrap_or(rest.len());
    std::str::from_utf8(&rest[..value_end]).ok()?.parse().ok()
}

/// 部分列の開始位置を探す
fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
