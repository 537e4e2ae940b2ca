//! 출력 형식 및 공통 포맷터.

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use bandar_core::AnalyzedRecord;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid format: {}. Use: table, csv, json",
                s
            )),
        }
    }
}

/// 파일 또는 stdout에 출력합니다.
pub fn emit(content: &str, output_path: Option<&str>) -> Result<()> {
    if let Some(path) = output_path {
        let mut file =
            File::create(path).with_context(|| format!("Failed to create output file: {}", path))?;
        file.write_all(content.as_bytes())
            .context("Failed to write to file")?;
        info!("Output written to: {}", path);
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// JSON 직렬화 (보기 좋게).
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize JSON")
}

/// 루피아 금액을 십억(M) 단위로 표시합니다. 예: `Rp 8.00 M`
pub fn rupiah_billions(amount: Decimal) -> String {
    let billions = amount.to_f64().unwrap_or(0.0) / 1e9;
    format!("Rp {:.2} M", billions)
}

/// 분석 행 테이블 형식 출력.
pub fn format_rows_table(rows: &[&AnalyzedRecord]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<4} {:<8} {:<12} {:<20} {:>8} {:<18} {:<8} {:>8} {:<5} {:<25}\n",
        "#", "CODE", "DATE", "SECTOR", "SCORE", "SIGNAL", "FLOW", "SPIKE_X", "SPIKE", "PATTERN"
    ));
    output.push_str(&"-".repeat(125));
    output.push('\n');

    for (i, row) in rows.iter().enumerate() {
        let r = &row.record;
        let d = &row.derived;
        output.push_str(&format!(
            "{:<4} {:<8} {:<12} {:<20} {:>8.1} {:<18} {:<8} {:>8.2} {:<5} {:<25}\n",
            i + 1,
            r.stock_code,
            r.date.to_string(),
            truncate(&r.sector, 20),
            d.strength_score,
            truncate(r.final_signal.as_str(), 18),
            d.foreign_flow_direction.as_str(),
            d.volume_spike_ratio,
            if d.volume_spike { "Y" } else { "" },
            d.big_player_pattern.as_str(),
        ));
    }

    output.push_str(&format!("\n총 {}개 행", rows.len()));
    output
}

/// 표시 폭에 맞게 자릅니다.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(2)).collect();
        format!("{}..", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_format() {
        assert_eq!(OutputFormat::parse("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::parse("xml").is_err());
    }

    #[test]
    fn test_rupiah_billions() {
        assert_eq!(rupiah_billions(dec!(8000000000)), "Rp 8.00 M");
        assert_eq!(rupiah_billions(dec!(-1250000000)), "Rp -1.25 M");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Finance", 20), "Finance");
        assert_eq!(truncate("Consumer Staples Sector", 10), "Consumer..");
    }
}
