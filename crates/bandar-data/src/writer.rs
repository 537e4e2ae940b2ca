//! CSV 출력.
//!
//! 원시 데이터셋(데모 내보내기)과 분석 테이블(원본 컬럼 + 파생 필드)을 CSV로 씁니다.
//! 원본 컬럼의 헤더 이름은 입력 스키마와 동일하므로 다시 읽어들일 수 있습니다.

use std::io::Write;
use std::path::Path;

use bandar_core::{AnalyzedTable, Column, TradingRecord};

use crate::error::Result;

/// 분석 결과에 덧붙는 파생 컬럼 헤더.
pub const DERIVED_HEADERS: [&str; 12] = [
    "Foreign Flow",
    "volume_norm",
    "imbalance_norm",
    "foreign_ratio",
    "z_volume",
    "z_imbalance",
    "z_foreign",
    "30d_avg_volume",
    "Volume_Spike_Ratio",
    "Volume_Spike",
    "Strength_Score",
    "Big_Player_Pattern",
];

fn record_cells(record: &TradingRecord) -> Vec<String> {
    vec![
        record.stock_code.clone(),
        record.date.to_string(),
        record.sector.clone(),
        record.company_name.clone(),
        record.volume.to_string(),
        record.imbalance.to_string(),
        record.foreign_buy.to_string(),
        record.foreign_sell.to_string(),
        record.final_signal.to_string(),
        record.close.map(|c| c.to_string()).unwrap_or_default(),
        record.frequency.map(|f| f.to_string()).unwrap_or_default(),
    ]
}

fn record_headers() -> Vec<&'static str> {
    Column::ALL.iter().map(|c| c.header()).collect()
}

/// 원시 레코드를 CSV로 씁니다.
pub fn write_records<W: Write>(writer: W, records: &[TradingRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(record_headers())?;
    for record in records {
        wtr.write_record(record_cells(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// 원시 레코드를 CSV 파일로 저장합니다.
pub fn write_records_csv(path: impl AsRef<Path>, records: &[TradingRecord]) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_records(file, records)
}

/// 분석 테이블을 CSV로 씁니다.
pub fn write_analyzed<W: Write>(writer: W, table: &AnalyzedTable) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut headers = record_headers();
    headers.extend(DERIVED_HEADERS);
    wtr.write_record(&headers)?;

    for row in &table.rows {
        let d = &row.derived;
        let mut cells = record_cells(&row.record);
        cells.extend([
            d.foreign_flow_direction.to_string(),
            d.volume_norm.to_string(),
            d.imbalance_norm.to_string(),
            d.foreign_ratio.to_string(),
            d.z_volume.to_string(),
            d.z_imbalance.to_string(),
            d.z_foreign.to_string(),
            d.rolling_avg_volume_30.to_string(),
            d.volume_spike_ratio.to_string(),
            d.volume_spike.to_string(),
            format!("{:.4}", d.strength_score),
            d.big_player_pattern.to_string(),
        ]);
        wtr.write_record(&cells)?;
    }
    wtr.flush()?;
    Ok(())
}

/// 분석 테이블을 CSV 파일로 저장합니다.
pub fn write_analyzed_csv(path: impl AsRef<Path>, table: &AnalyzedTable) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_analyzed(file, table)
}
