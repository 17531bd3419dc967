use crate::errors::Result;
use image::DynamicImage;

/// フレームセグメンテーション処理の抽象化
///
/// 依存関係逆転原則（DIP）に従い、具象クラスではなく抽象に依存する。
/// バッチドライバはこのトレイト経由で変換を呼び出すため、テストでは
/// モック実装に差し替えられる。
pub trait FrameSegmenter: Send + Sync {
    /// 1 フレームのセグメンテーション処理を実行
    ///
    /// 入力と同じ寸法の画像を返し、アルファチャンネルのみ書き換える。
    fn segment_image(&self, img: &DynamicImage) -> Result<DynamicImage>;
}
