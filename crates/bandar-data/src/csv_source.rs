//! 로컬 CSV 데이터 소스.
//!
//! 헤더는 [`TableSchema`]로 한 번만 검증하고, 이후 각 행을 컬럼 인덱스 맵으로 변환합니다.
//! 파일이 없으면 경고 후 "데이터 없음"을 반환합니다.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use bandar_core::TableSchema;
use tracing::{debug, info, warn};

use crate::dataset::{DataSource, Dataset, FetchOutcome};
use crate::error::Result;

/// CSV 파일 데이터 소스.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    path: PathBuf,
    schema: TableSchema,
}

impl CsvDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            schema: TableSchema::default(),
        }
    }

    /// 파일 경로 + 수정 시각 + 크기로 데이터셋 버전을 만듭니다.
    fn version(&self) -> String {
        let meta = std::fs::metadata(&self.path).ok();
        let modified = meta
            .as_ref()
            .and_then(|m| m.modified().ok())
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |d| d.as_secs());
        let len = meta.map_or(0, |m| m.len());
        format!("{}@{}:{}", self.path.display(), modified, len)
    }
}

impl DataSource for CsvDataSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self) -> Result<FetchOutcome> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "입력 파일이 없습니다. 데이터 없음으로 처리합니다");
            return Ok(FetchOutcome::NoData);
        }

        let file = File::open(&self.path)?;
        let dataset = read_dataset(BufReader::new(file), &self.schema, self.version())?;
        info!(
            path = %self.path.display(),
            rows = dataset.len(),
            rejected = dataset.rejected_rows(),
            degraded = dataset.degraded_rows(),
            "CSV 로드 완료"
        );
        Ok(FetchOutcome::Table(dataset))
    }
}

/// 임의의 리더에서 CSV 데이터셋을 읽습니다.
///
/// 필수 컬럼이 없으면 `MissingField`로 실패합니다.
pub fn read_dataset<R: Read>(
    reader: R,
    schema: &TableSchema,
    version: impl Into<String>,
) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let map = schema.validate_headers(&headers)?;
    if !map.ignored.is_empty() {
        debug!(columns = ?map.ignored, "파생 컬럼은 재계산되므로 무시합니다");
    }

    let mut dataset = Dataset::new(version, Vec::new());
    dataset.ignored_columns = map.ignored.clone();

    for (row, result) in reader.records().enumerate() {
        let cells = result?;
        let cells: Vec<&str> = cells.iter().collect();
        let outcome = schema.record_from_cells(&map, row, &cells);

        for issue in &outcome.issues {
            if issue.rejected {
                warn!(row = issue.row, column = ?issue.column, reason = %issue.reason, "행 제외");
            } else {
                debug!(row = issue.row, column = ?issue.column, reason = %issue.reason, "셀 값 대체");
            }
        }
        dataset.issues.extend(outcome.issues);
        if let Some(record) = outcome.record {
            dataset.records.push(record);
        }
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandar_core::FinalSignal;
    use rust_decimal_macros::dec;

    const CSV: &str = "\
Stock Code,Last Trading Date,Sector,Company Name,Volume,Bid/Offer Imbalance,Foreign Buy,Foreign Sell,Final Signal,Close,Strength_Score
BBCA,2024-07-26,Financials,Bank Central Asia Tbk.,1500000,0.42,12000000000,3000000000,Strong Akumulasi,9800,77.1
TLKM,2024-07-26 00:00:00,Technology,Telkom Indonesia Tbk.,abc,-0.2,1000,2000,Distribusi,,
,2024-07-26,Energy,Missing Code,10,0.1,1,1,Netral,,
";

    #[test]
    fn test_read_dataset() {
        let dataset = read_dataset(CSV.as_bytes(), &TableSchema::default(), "mem").unwrap();

        assert_eq!(dataset.version, "mem");
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.ignored_columns, vec!["Strength_Score".to_string()]);
        assert_eq!(dataset.rejected_rows(), 1);

        let bbca = &dataset.records[0];
        assert_eq!(bbca.final_signal, FinalSignal::StrongAkumulasi);
        assert_eq!(bbca.foreign_buy, dec!(12000000000));
        assert_eq!(bbca.close, Some(dec!(9800)));
        assert!(!bbca.degraded);

        let tlkm = &dataset.records[1];
        assert_eq!(tlkm.volume, 0);
        assert!(tlkm.degraded);
        assert_eq!(tlkm.close, None);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Stock Code,Last Trading Date\nBBCA,2024-07-26\n";
        let err = read_dataset(csv.as_bytes(), &TableSchema::default(), "mem").unwrap_err();
        assert!(err.is_missing_field());
    }

    #[test]
    fn test_missing_file_is_no_data() {
        let source = CsvDataSource::new("/nonexistent/hasil_gabungan.csv");
        assert!(source.fetch().unwrap().is_no_data());
    }
}
