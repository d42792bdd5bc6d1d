//! フレームリーダー
//!
//! tokio の非同期リーダーからチャンクを読み取り、アキュムレーターに
//! 投入してフレームの完成を待つトランスポート側ループ。
//!
//! ## 使い方
//!
//! ```ignore
//! use tokio_http1_framing::FrameReader;
//!
//! let (stream, _) = listener.accept().await?;
//! let mut reader = FrameReader::new(stream);
//!
//! while let Some(frame) = reader.read_frame().await? {
//!     let request = shiguredo_http1_framing::parse_request(frame)?;
//!     // アプリケーション層でリクエストを処理してレスポンスを書く...
//!     reader.reset();
//! }
//! ```

use std::time::Duration;

use shiguredo_http1_framing::{AccumulateStatus, AccumulatorLimits, RequestAccumulator};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{Error, Result};

/// デフォルトの読み取りバッファサイズ
const DEFAULT_READ_BUFFER_SIZE: usize = 8192;

/// フレームリーダー
///
/// 接続ごとに 1 インスタンスを所有する。`read_frame()` がフレーム 1 個分の
/// バイト列を返したら、次のフレームを読む前に `reset()` を呼ぶこと
/// (アキュムレーターの再利用契約と同じ)。
#[derive(Debug)]
pub struct FrameReader<R> {
    reader: R,
    accumulator: RequestAccumulator,
    read_buffer_size: usize,
    read_timeout: Option<Duration>,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// デフォルト制限でフレームリーダーを作成
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            accumulator: RequestAccumulator::new(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            read_timeout: None,
        }
    }

    /// 制限付きでフレームリーダーを作成
    pub fn with_limits(reader: R, limits: AccumulatorLimits) -> Result<Self> {
        Ok(Self {
            reader,
            accumulator: RequestAccumulator::with_limits(limits)?,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            read_timeout: None,
        })
    }

    /// 読み取りバッファサイズを設定
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// 読み取りタイムアウトを設定
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// 内部アキュムレーターへの参照を取得
    pub fn accumulator(&self) -> &RequestAccumulator {
        &self.accumulator
    }

    /// フレーム 1 個分のバイト列を読み取る
    ///
    /// フレームが揃うまでリーダーから読み続ける。
    ///
    /// - フレーム開始前のクリーンな EOF は `Ok(None)` を返す
    /// - フレーム途中の EOF は `Error::ConnectionClosed` を返す
    /// - 容量超過 (`Error::Framing`) は接続にとって致命的で、
    ///   このインスタンスは破棄する必要がある
    pub async fn read_frame(&mut self) -> Result<Option<&[u8]>> {
        let mut buf = vec![0u8; self.read_buffer_size];

        loop {
            let n = match self.read_timeout {
                Some(timeout) => {
                    tokio::time::timeout(timeout, self.reader.read(&mut buf)).await??
                }
                None => self.reader.read(&mut buf).await?,
            };

            if n == 0 {
                if self.accumulator.bytes_accumulated() == 0 {
                    return Ok(None);
                }
                return Err(Error::ConnectionClosed);
            }

            if self.accumulator.accumulate(&buf[..n])? == AccumulateStatus::Complete {
                return Ok(Some(self.accumulator.accumulated_data()));
            }
        }
    }

    /// 次のフレームのためにアキュムレーターをリセット
    pub fn reset(&mut self) {
        self.accumulator.reset();
    }
}
