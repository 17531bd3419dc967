use std::path::{Path, PathBuf};

use crate::config::Config;

/// 既定のデータセット一覧（CLI 引数で上書き可能）
pub const DEFAULT_DATASETS: [&str; 6] = [
    "male_idle",
    "female_idle",
    "male_walk",
    "female_walk",
    "hug",
    "heart",
];

/// 1 データセット分の入出力ディレクトリペア
///
/// `<frames_root>/<name>/<raw_subdir>` のフレームを処理して
/// `<frames_root>/<name>/<nobg_subdir>` に書き出す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub name: String,
    pub raw_dir: PathBuf,
    pub nobg_dir: PathBuf,
}

impl Dataset {
    pub fn resolve(frames_root: &Path, name: &str, raw_subdir: &str, nobg_subdir: &str) -> Self {
        let base = frames_root.join(name);
        Self {
            name: name.to_string(),
            raw_dir: base.join(raw_subdir),
            nobg_dir: base.join(nobg_subdir),
        }
    }
}

/// 設定からデータセットの一覧を解決する
///
/// 存在しないディレクトリの除外はここでは行わない。バッチドライバが
/// 処理時に `[SKIP]` として報告する。
pub fn resolve_datasets(config: &Config) -> Vec<Dataset> {
    config
        .datasets
        .iter()
        .map(|name| {
            Dataset::resolve(
                &config.frames_root,
                name,
                &config.raw_subdir,
                &config.nobg_subdir,
            )
        })
        .collect()
}
