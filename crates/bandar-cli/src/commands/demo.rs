//! 데모 데이터 내보내기.

use anyhow::{Context, Result};
use bandar_data::{write_records_csv, DemoDataSource};
use tracing::info;

/// 데모 내보내기 설정.
#[derive(Debug)]
pub struct DemoConfig {
    pub output: String,
    pub days: usize,
    pub seed: u64,
}

/// 데모 데이터셋을 CSV로 저장합니다.
pub fn run_demo(config: &DemoConfig) -> Result<usize> {
    let dataset = DemoDataSource::new(config.days, config.seed).generate();
    write_records_csv(&config.output, &dataset.records)
        .with_context(|| format!("Failed to write demo data: {}", config.output))?;

    info!(rows = dataset.len(), path = %config.output, "데모 데이터 저장 완료");
    println!("데모 데이터 저장: {} ({}개 행)", config.output, dataset.len());
    Ok(dataset.len())
}
