/// アキュムレーターの制限設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccumulatorLimits {
    /// 最大バッファサイズ (デフォルト: 10MB)
    ///
    /// ヘッダーとボディを合わせた 1 フレームの総蓄積量の上限。
    /// 超過は接続にとって致命的で、リトライできない。
    pub max_buffer_size: usize,
}

impl Default for AccumulatorLimits {
    fn default() -> Self {
        Self {
            max_buffer_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl AccumulatorLimits {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            max_buffer_size: usize::MAX,
        }
    }
}
