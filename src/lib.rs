pub mod config;
pub mod datasets;
pub mod errors;
pub mod mask;
pub mod morphology;
pub mod segmenter;
pub mod traits;

pub mod mocks;

use image::ImageFormat;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use config::Config;
pub use datasets::{resolve_datasets, Dataset, DEFAULT_DATASETS};
pub use errors::{OutlineSegError, Result};
pub use segmenter::Segmenter;
pub use traits::*;

#[cfg(test)]
pub use mocks::*;

/// 1 データセット分の処理結果
///
/// フレーム単位の失敗はバッチを中断せず、ここに集約して報告する。
#[derive(Debug)]
pub struct DatasetReport {
    pub name: String,
    pub processed: usize,
    pub failures: Vec<(PathBuf, OutlineSegError)>,
    pub skipped: bool,
}

impl DatasetReport {
    fn skipped(name: String) -> Self {
        Self {
            name,
            processed: 0,
            failures: Vec::new(),
            skipped: true,
        }
    }
}

pub struct FrameProcessor<S: FrameSegmenter> {
    segmenter: S,
    config: Config,
}

impl<S: FrameSegmenter> FrameProcessor<S> {
    pub const fn new(segmenter: S, config: Config) -> Self {
        Self { segmenter, config }
    }

    /// データセットを順番に処理する（データセット内のフレームは並列）
    pub fn process_all(&self, datasets: &[Dataset]) -> Result<Vec<DatasetReport>> {
        let mut reports = Vec::with_capacity(datasets.len());

        for dataset in datasets {
            if !dataset.raw_dir.exists() {
                println!("[SKIP] {} が見つかりません", dataset.raw_dir.display());
                reports.push(DatasetReport::skipped(dataset.name.clone()));
                continue;
            }

            println!("--- {} ---", dataset.name);
            reports.push(self.process_dataset(dataset)?);
        }

        Ok(reports)
    }

    pub fn process_dataset(&self, dataset: &Dataset) -> Result<DatasetReport> {
        let frames = self.collect_frames(&dataset.raw_dir)?;

        if frames.is_empty() {
            println!("処理対象のフレームが見つかりません");
            return Ok(DatasetReport::skipped(dataset.name.clone()));
        }

        fs::create_dir_all(&dataset.nobg_dir).map_err(|e| OutlineSegError::FileSystem {
            path: dataset.nobg_dir.clone(),
            operation: "ディレクトリ作成".to_string(),
            source: e,
        })?;

        let pb = ProgressBar::new(frames.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );

        // 1 フレームの失敗でバッチ全体を止めない
        let failures = Mutex::new(Vec::new());
        frames.par_iter().for_each(|input_file| {
            if let Err(e) = self.process_single_frame(input_file, dataset) {
                failures.lock().push((input_file.clone(), e));
            }
            pb.inc(1);
        });

        pb.finish_with_message("処理完了");

        let failures = failures.into_inner();
        for (path, error) in &failures {
            println!("[FAIL] {}: {}", path.display(), error);
        }

        Ok(DatasetReport {
            name: dataset.name.clone(),
            processed: frames.len() - failures.len(),
            failures,
            skipped: false,
        })
    }

    fn collect_frames(&self, raw_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut frames: Vec<_> = WalkDir::new(raw_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| ImageFormat::from_path(e.path()).is_ok())
            .map(|e| e.into_path())
            .collect();

        // 報告順を安定させる
        frames.sort();
        Ok(frames)
    }

    fn process_single_frame(&self, input_file: &Path, dataset: &Dataset) -> Result<()> {
        let img = image::open(input_file).map_err(|e| OutlineSegError::InvalidImage {
            path: input_file.display().to_string(),
            reason: e.to_string(),
        })?;

        let masked = self.segmenter.segment_image(&img)?;

        let output_file = self.output_path(input_file, dataset)?;
        if let Some(parent) = output_file.parent() {
            fs::create_dir_all(parent).map_err(|e| OutlineSegError::FileSystem {
                path: parent.to_path_buf(),
                operation: "出力ディレクトリ作成".to_string(),
                source: e,
            })?;
        }

        let output_format =
            ImageFormat::from_extension(&self.config.format).unwrap_or(ImageFormat::Png);

        if let Err(e) = masked.save_with_format(&output_file, output_format) {
            // 途中まで書かれたファイルを残さない
            let _ = fs::remove_file(&output_file);
            return Err(OutlineSegError::ImageProcessing {
                path: output_file.display().to_string(),
                operation: "画像保存".to_string(),
                source: Box::new(e),
            });
        }

        Ok(())
    }

    pub fn output_path(&self, input_file: &Path, dataset: &Dataset) -> Result<PathBuf> {
        let relative =
            input_file
                .strip_prefix(&dataset.raw_dir)
                .map_err(|_| OutlineSegError::FileSystem {
                    path: input_file.to_path_buf(),
                    operation: "相対パス取得".to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "入力ファイルが入力ディレクトリ内にありません",
                    ),
                })?;

        Ok(dataset
            .nobg_dir
            .join(relative)
            .with_extension(&self.config.format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(frames_root: PathBuf) -> Config {
        Config {
            frames_root,
            datasets: Vec::new(),
            raw_subdir: "raw".to_string(),
            nobg_subdir: "nobg".to_string(),
            format: "png".to_string(),
            dark_threshold: 80,
            dilate_outline: 1,
            expand_bg: 2,
            num_threads: 4,
        }
    }

    #[test]
    fn test_output_path_mirrors_relative_structure() -> Result<()> {
        let config = test_config("/frames".into());
        let processor = FrameProcessor::new(MockSegmenter::new(), config);

        let dataset = Dataset::resolve(Path::new("/frames"), "hug", "raw", "nobg");
        let input = dataset.raw_dir.join("part1/frame_0042.png");

        let output = processor.output_path(&input, &dataset)?;
        assert_eq!(output, Path::new("/frames/hug/nobg/part1/frame_0042.png"));
        Ok(())
    }

    #[test]
    fn test_output_path_swaps_extension() -> Result<()> {
        let mut config = test_config("/frames".into());
        config.format = "webp".to_string();
        let processor = FrameProcessor::new(MockSegmenter::new(), config);

        let dataset = Dataset::resolve(Path::new("/frames"), "heart", "raw", "nobg");
        let input = dataset.raw_dir.join("frame_0001.png");

        let output = processor.output_path(&input, &dataset)?;
        assert_eq!(output, Path::new("/frames/heart/nobg/frame_0001.webp"));
        Ok(())
    }

    #[test]
    fn test_output_path_rejects_file_outside_raw_dir() {
        let config = test_config("/frames".into());
        let processor = FrameProcessor::new(MockSegmenter::new(), config);

        let dataset = Dataset::resolve(Path::new("/frames"), "hug", "raw", "nobg");
        let outside = PathBuf::from("/elsewhere/frame_0001.png");

        assert!(processor.output_path(&outside, &dataset).is_err());
    }
}
