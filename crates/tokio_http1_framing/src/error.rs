//! tokio_http1_framing エラー型

use std::fmt;

/// tokio_http1_framing エラー
#[derive(Debug)]
pub enum Error {
    /// I/O エラー
    Io(std::io::Error),
    /// フレーミングエラー
    Framing(shiguredo_http1_framing::Error),
    /// 読み取りタイムアウト
    Timeout,
    /// フレームの途中で接続が閉じられた
    ConnectionClosed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Framing(e) => write!(f, "framing error: {}", e),
            Error::Timeout => write!(f, "read timeout"),
            Error::ConnectionClosed => write!(f, "connection closed mid-frame"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Framing(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<shiguredo_http1_framing::Error> for Error {
    fn from(e: shiguredo_http1_framing::Error) -> Self {
        Error::Framing(e)
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Error::Timeout
    }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
