use crate::errors::{OutlineSegError, Result};
use crate::traits::FrameSegmenter;
use image::DynamicImage;

#[cfg(test)]
use image::GenericImageView;

/// テスト用のモックセグメンター
#[derive(Debug, Clone)]
pub struct MockSegmenter {
    pub fail: bool,
}

impl MockSegmenter {
    pub const fn new() -> Self {
        Self { fail: false }
    }

    /// 常に失敗するモック（フレーム単位の失敗分離のテスト用）
    pub const fn failing() -> Self {
        Self { fail: true }
    }
}

impl Default for MockSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSegmenter for MockSegmenter {
    fn segment_image(&self, img: &DynamicImage) -> Result<DynamicImage> {
        if self.fail {
            return Err(OutlineSegError::InvalidImage {
                path: "mock".to_string(),
                reason: "forced failure".to_string(),
            });
        }
        // テスト用の簡易実装：入力画像をそのまま返す
        Ok(img.clone())
    }
}
