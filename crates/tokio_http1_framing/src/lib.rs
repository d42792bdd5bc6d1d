//! tokio_http1_framing - Tokio integration for shiguredo_http1_framing
//!
//! tokio を使用してバイトストリームから HTTP/1.x リクエストフレームを
//! 読み取るトランスポート層。
//!
//! ## 特徴
//!
//! - **shiguredo_http1_framing ベース**: Sans I/O コアをベースにした設計。
//!   フレームの完成判定はすべてコア側が行い、この crate は
//!   「チャンクを供給して `Complete` / `NeedMoreData` を消費する」
//!   接続処理ループだけを提供する
//! - **非同期 I/O**: tokio による完全非同期対応
//! - **読み取りタイムアウト**: 接続単位のタイムアウト設定
//!
//! ## 使い方
//!
//! ```ignore
//! use tokio_http1_framing::FrameReader;
//! use shiguredo_http1_framing::parse_request;
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! let (stream, _) = listener.accept().await?;
//!
//! let mut reader = FrameReader::new(stream);
//! while let Some(frame) = reader.read_frame().await? {
//!     let request = parse_request(frame)?;
//!     // アプリケーション層でリクエストを処理してレスポンスを書く...
//!     reader.reset();
//! }
//! ```

pub mod error;
pub mod reader;

pub use error::{Error, Result};
pub use reader::FrameReader;

// shiguredo_http1_framing の型を re-export
pub use shiguredo_http1_framing::{
    AccumulateStatus, AccumulatorLimits, ParsedRequest, RequestAccumulator, parse_request,
};
