use std::{path::PathBuf, thread};

use clap::Parser;
use image::ImageFormat;

use crate::datasets::DEFAULT_DATASETS;
use crate::segmenter;

#[derive(Parser, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// フレームディレクトリのルート（データセット毎にサブディレクトリを持つ）
    pub frames_root: PathBuf,

    /// 処理対象のデータセット名（省略時は既定の一覧を処理）
    #[arg(default_values_t = DEFAULT_DATASETS.map(String::from))]
    pub datasets: Vec<String>,

    /// 入力フレームのサブディレクトリ名
    #[arg(long, default_value = "raw")]
    pub raw_subdir: String,

    /// 出力フレームのサブディレクトリ名
    #[arg(long, default_value = "nobg")]
    pub nobg_subdir: String,

    /// 出力フォーマット（アルファチャンネルを劣化なく保存できるもののみ）
    #[arg(short, long, default_value = "png", value_parser = check_format)]
    pub format: String,

    /// 暗さのしきい値（チャンネル毎、0-255）
    #[arg(long, default_value_t = i32::from(segmenter::DEFAULT_DARK_THRESHOLD))]
    pub dark_threshold: i32,

    /// 輪郭を閉じるための膨張回数
    #[arg(long, default_value_t = segmenter::DEFAULT_DILATE_OUTLINE as i32)]
    pub dilate_outline: i32,

    /// 背景マスクの拡張回数（輪郭外側のハロー除去）
    #[arg(long, default_value_t = segmenter::DEFAULT_EXPAND_BG as i32)]
    pub expand_bg: i32,

    #[arg(
        short, long, default_value_t = thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get)
    )]
    pub num_threads: usize,
}

/// アルファチャンネルを正確に保持できるロスレスフォーマットのみ許可する
const fn supports_exact_alpha(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Png | ImageFormat::WebP | ImageFormat::Tiff)
}

fn check_format(s: &str) -> Result<String, String> {
    let supported: Vec<_> = ImageFormat::all()
        .filter(|f| f.writing_enabled() && supports_exact_alpha(*f))
        .flat_map(|f| f.extensions_str())
        .map(|s| format!("`{}`", s))
        .collect();
    let supported_message = format!("Supported formats: {}", supported.join(", "));

    let format = ImageFormat::from_extension(s)
        .ok_or(format!("{} is not supported. {}", s, supported_message))?;
    if !format.writing_enabled() || !supports_exact_alpha(format) {
        return Err(format!("{} is not supported. {}", s, supported_message));
    }

    Ok(s.to_string())
}
