use image::{DynamicImage, GenericImageView, RgbImage};
use ndarray::{Array2, Axis, Zip};
use nshare::AsNdarray3;

use crate::{
    errors::{OutlineSegError, Result},
    mask::{self, AlphaMaskApplicable},
    morphology,
    traits::FrameSegmenter,
};

pub const DEFAULT_DARK_THRESHOLD: u8 = 80;
pub const DEFAULT_DILATE_OUTLINE: u32 = 1;
pub const DEFAULT_EXPAND_BG: u32 = 2;

/// 輪郭ベースの背景除去
///
/// 閉じた黒い輪郭をフラッドフィルのバリアとして扱い、キャンバス端から
/// 到達できる領域を背景に分類する。色ではなく形状で判定するため、
/// 白い腹のような明るい内部領域も保持される。出力アルファは二値
/// （背景 = 0、それ以外 = 255）で、RGB チャンネルは変更しない。
#[derive(Debug, Clone, Copy)]
pub struct Segmenter {
    dark_threshold: u8,
    dilate_outline: u32,
    expand_bg: u32,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            dark_threshold: DEFAULT_DARK_THRESHOLD,
            dilate_outline: DEFAULT_DILATE_OUTLINE,
            expand_bg: DEFAULT_EXPAND_BG,
        }
    }
}

impl Segmenter {
    pub fn new(dark_threshold: i32, dilate_outline: i32, expand_bg: i32) -> Result<Self> {
        if !(0..=255).contains(&dark_threshold) {
            return Err(OutlineSegError::InvalidParameter {
                field: "dark_threshold".to_string(),
                reason: format!("must be within 0-255, got {}", dark_threshold),
            });
        }
        if dilate_outline < 0 {
            return Err(OutlineSegError::InvalidParameter {
                field: "dilate_outline".to_string(),
                reason: format!("must not be negative, got {}", dilate_outline),
            });
        }
        if expand_bg < 0 {
            return Err(OutlineSegError::InvalidParameter {
                field: "expand_bg".to_string(),
                reason: format!("must not be negative, got {}", expand_bg),
            });
        }

        Ok(Self {
            dark_threshold: dark_threshold as u8,
            dilate_outline: dilate_outline as u32,
            expand_bg: expand_bg as u32,
        })
    }

    pub fn segment(&self, img: &DynamicImage) -> Result<DynamicImage> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(OutlineSegError::InvalidImage {
                path: "unknown".to_string(),
                reason: format!("empty pixel grid ({}x{})", width, height),
            });
        }

        // 入力のアルファは無視し、RGB のみから分類する
        let rgb = img.to_rgb8();

        // 黒い輪郭ピクセルを検出（RGB 合計がしきい値未満）
        let is_dark = self.darkness_mask(&rgb);

        // 輪郭を膨張させて小さな隙間を閉じる（フラッドフィルのバリア）
        let barrier = morphology::dilate(&is_dark, self.dilate_outline);

        // バリア以外を連結成分に分割し、キャンバス端に接する成分を背景とする
        let fillable = barrier.map(|b| !b);
        let (labels, _) = morphology::label_components(&fillable);
        let edge = morphology::edge_labels(&labels);
        let mut background = morphology::mask_of_labels(&labels, &edge);

        // 背景マスクを拡張して輪郭外側の白いハローを除去
        background = morphology::dilate(&background, self.expand_bg);

        // 内部領域と元の輪郭は保護する（背景拡張に侵食させない）
        Zip::from(&mut background)
            .and(&labels)
            .and(&is_dark)
            .for_each(|bg, &label, &dark| {
                let interior = label != 0 && !edge.contains(&label);
                if interior || dark {
                    *bg = false;
                }
            });

        // アルファチャンネルへ書き込み
        let alpha = mask::binary_alpha_plane(&background);
        let rgba =
            rgb.apply_alpha_mask(&alpha)
                .map_err(|e| OutlineSegError::ImageProcessing {
                    path: "unknown".to_string(),
                    operation: "マスク適用".to_string(),
                    source: e.into(),
                })?;

        Ok(DynamicImage::ImageRgba8(rgba))
    }

    fn darkness_mask(&self, rgb: &RgbImage) -> Array2<bool> {
        let cutoff = u32::from(self.dark_threshold) * 3;
        let channels = rgb.as_ndarray3();
        let red = channels.index_axis(Axis(0), 0);
        let green = channels.index_axis(Axis(0), 1);
        let blue = channels.index_axis(Axis(0), 2);

        Zip::from(&red)
            .and(&green)
            .and(&blue)
            .map_collect(|&r, &g, &b| u32::from(r) + u32::from(g) + u32::from(b) < cutoff)
    }
}

impl FrameSegmenter for Segmenter {
    fn segment_image(&self, img: &DynamicImage) -> Result<DynamicImage> {
        self.segment(img)
    }
}
