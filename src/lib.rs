//! # shiguredo_http1_framing
//!
//! 依存なしの HTTP/1.x リクエストフレーミングライブラリ (Sans I/O)
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用
//! - **Sans I/O**: I/O を完全に分離した設計。ソケットの読み書きは
//!   呼び出し側の接続処理ループが担う
//! - **最小コピー**: リクエストラインとボディはフレームバッファへの
//!   借用ビューとして返す
//!
//! ## 構成
//!
//! - [`RequestAccumulator`]: チャンクを蓄積し、1 リクエスト分のフレームが
//!   揃ったかどうかを判定するストリーミングバッファリング層
//! - [`parse_request`]: 揃ったフレームをリクエストライン/ヘッダー/ボディに
//!   分解する状態なしパーサー
//!
//! 両者は互いに依存せず、呼び出し側を介してのみ組み合わさる。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_http1_framing::{AccumulateStatus, RequestAccumulator, parse_request};
//!
//! let mut accumulator = RequestAccumulator::new();
//!
//! // トランスポートから届いたチャンクを順に投入する
//! let status = accumulator
//!     .accumulate(b"POST /api HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello")
//!     .unwrap();
//!
//! if status == AccumulateStatus::Complete {
//!     let request = parse_request(accumulator.accumulated_data()).unwrap();
//!     assert_eq!(request.request_line.method, b"POST");
//!     assert_eq!(request.body, b"hello");
//!
//!     // アプリケーション層にリクエストを渡した後、
//!     // 同じ接続で次のフレームを読む前にリセットする
//!     accumulator.reset();
//! }
//! ```

mod accumulator;
mod error;
mod limits;
mod parser;

pub use accumulator::{AccumulateStatus, AccumulatorState, RequestAccumulator};
pub use error::Error;
pub use limits::AccumulatorLimits;
pub use parser::{Header, ParsedRequest, RequestLine, parse_request};
