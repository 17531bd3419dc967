use anyhow::{ensure, Result};
use clap::Parser;
use rayon::ThreadPoolBuilder;

use outline_seg_rs::{resolve_datasets, Config, FrameProcessor, Segmenter};

fn main() -> Result<()> {
    let config = Config::parse();

    ensure!(config.frames_root.exists(), "Frames root does not exist");

    ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()?;

    let segmenter = Segmenter::new(config.dark_threshold, config.dilate_outline, config.expand_bg)?;

    println!("=== 輪郭ベース背景除去 ===");
    println!("Dark threshold: {}", config.dark_threshold);
    println!();

    let datasets = resolve_datasets(&config);
    let processor = FrameProcessor::new(segmenter, config);
    let reports = processor.process_all(&datasets)?;

    let processed: usize = reports.iter().map(|r| r.processed).sum();
    let failed: usize = reports.iter().map(|r| r.failures.len()).sum();
    println!();
    if failed > 0 {
        println!(
            "=== 完了（{} フレーム処理、{} フレーム失敗） ===",
            processed, failed
        );
    } else {
        println!("=== 完了（{} フレーム処理） ===", processed);
    }

    Ok(())
}
