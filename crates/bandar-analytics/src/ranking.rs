//! 종목 순위, 비교, 이력 조회.

use std::collections::BTreeSet;

use bandar_core::{AnalyzedRecord, FinalSignal, ForeignFlow, TradingRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{PipelineError, PipelineResult};

/// 강도 점수 상위 `n`개 행.
///
/// 점수 내림차순, 동점이면 종목 코드 오름차순.
pub fn top_picks(rows: &[AnalyzedRecord], n: usize) -> Vec<&AnalyzedRecord> {
    let mut sorted: Vec<&AnalyzedRecord> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        b.strength_score()
            .total_cmp(&a.strength_score())
            .then_with(|| a.stock_code().cmp(b.stock_code()))
    });
    sorted.truncate(n);
    sorted
}

/// 한 종목의 `until` 이전(포함) 분석 행, 날짜 오름차순.
pub fn stock_history<'a>(
    rows: &'a [AnalyzedRecord],
    stock_code: &str,
    until: Option<NaiveDate>,
) -> Vec<&'a AnalyzedRecord> {
    let mut history: Vec<&AnalyzedRecord> = rows
        .iter()
        .filter(|r| r.stock_code() == stock_code)
        .filter(|r| until.map_or(true, |d| r.date() <= d))
        .collect();
    history.sort_by_key(|r| r.date());
    history
}

/// 종목 비교 항목.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub stock_code: String,
    pub company_name: String,
    pub strength_score: f64,
    pub final_signal: FinalSignal,
    pub net_foreign_flow: Decimal,
    /// 순매수가 양수면 Inflow
    pub flow_direction: ForeignFlow,
}

impl ComparisonEntry {
    fn from_row(row: &AnalyzedRecord) -> Self {
        let net = row.record.net_foreign_flow();
        Self {
            stock_code: row.record.stock_code.clone(),
            company_name: row.record.company_name.clone(),
            strength_score: row.strength_score(),
            final_signal: row.record.final_signal.clone(),
            net_foreign_flow: net,
            flow_direction: if net > Decimal::ZERO {
                ForeignFlow::Inflow
            } else {
                ForeignFlow::Outflow
            },
        }
    }
}

/// 2개 이상 `max`개 이하 종목을 비교합니다.
///
/// 분석 슬라이스에 없는 종목은 건너뜁니다. 종목당 첫 번째 행을 사용합니다.
pub fn compare<S: AsRef<str>>(
    rows: &[AnalyzedRecord],
    codes: &[S],
    max: usize,
) -> PipelineResult<Vec<ComparisonEntry>> {
    if codes.len() < 2 || codes.len() > max {
        return Err(PipelineError::InvalidInput(format!(
            "비교 종목 수는 2~{}개여야 합니다: {}",
            max,
            codes.len()
        )));
    }

    let entries = codes
        .iter()
        .filter_map(|code| {
            let code = code.as_ref();
            let row = rows.iter().find(|r| r.stock_code() == code);
            if row.is_none() {
                tracing::debug!(stock_code = code, "비교 대상 종목이 없어 건너뜁니다");
            }
            row.map(ComparisonEntry::from_row)
        })
        .collect();
    Ok(entries)
}

/// 정렬된 섹터 목록 (빈 섹터 제외).
pub fn sectors(records: &[TradingRecord]) -> Vec<String> {
    records
        .iter()
        .filter(|r| !r.sector.is_empty())
        .map(|r| r.sector.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 정렬된 종목 코드 목록.
pub fn stock_codes(records: &[TradingRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.stock_code.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 거래일 목록 (최신순).
pub fn trading_dates(records: &[TradingRecord]) -> Vec<NaiveDate> {
    records
        .iter()
        .map(|r| r.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// 가장 최근 거래일.
pub fn latest_date(records: &[TradingRecord]) -> Option<NaiveDate> {
    records.iter().map(|r| r.date).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn records() -> Vec<TradingRecord> {
        let mut out = Vec::new();
        for (i, code) in ["BBCA", "TLKM", "GOTO"].iter().enumerate() {
            for d in 0..3 {
                out.push(
                    TradingRecord::new(
                        *code,
                        base() + Duration::days(d),
                        1_000 * (i as u64 + 1) + d as u64,
                        0.1 * i as f64,
                        dec!(100),
                        dec!(80) + Decimal::from(i as i64 * 20),
                        FinalSignal::Netral,
                    )
                    .with_sector(if i == 2 { "Technology" } else { "Finance" }),
                );
            }
        }
        out
    }

    #[test]
    fn test_top_picks_order() {
        let table = Pipeline::default().run(&records());
        let top = top_picks(&table.rows, 4);
        assert_eq!(top.len(), 4);
        for pair in top.windows(2) {
            assert!(pair[0].strength_score() >= pair[1].strength_score());
        }
    }

    #[test]
    fn test_top_picks_ties_by_code() {
        let date = base();
        let records = vec![
            TradingRecord::new("ZZZ", date, 10, 0.0, dec!(1), dec!(1), FinalSignal::Netral),
            TradingRecord::new("AAA", date, 10, 0.0, dec!(1), dec!(1), FinalSignal::Netral),
        ];
        let table = Pipeline::default().run(&records);
        let top = top_picks(&table.rows, 25);
        assert_eq!(top[0].stock_code(), "AAA");
        assert_eq!(top[1].stock_code(), "ZZZ");
    }

    #[test]
    fn test_stock_history_until_date() {
        let table = Pipeline::default().run(&records());
        let history = stock_history(&table.rows, "TLKM", Some(base() + Duration::days(1)));
        assert_eq!(history.len(), 2);
        assert!(history[0].date() < history[1].date());
        assert_eq!(stock_history(&table.rows, "TLKM", None).len(), 3);
    }

    #[test]
    fn test_compare_limits() {
        let table = Pipeline::default().run_filtered(
            &records(),
            &crate::pipeline::RowFilter::on_date(base()),
        );
        assert!(compare(&table.rows, &["BBCA"], 4).is_err());
        assert!(compare(&table.rows, &["A", "B", "C", "D", "E"], 4).is_err());

        let entries = compare(&table.rows, &["BBCA", "NOPE", "GOTO"], 4).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].stock_code, "BBCA");
        assert_eq!(entries[0].net_foreign_flow, dec!(20));
        assert_eq!(entries[0].flow_direction, ForeignFlow::Inflow);
        // GOTO: 100 - 120
        assert_eq!(entries[1].flow_direction, ForeignFlow::Outflow);
    }

    #[test]
    fn test_filter_choices() {
        let records = records();
        assert_eq!(sectors(&records), vec!["Finance", "Technology"]);
        assert_eq!(stock_codes(&records), vec!["BBCA", "GOTO", "TLKM"]);
        let dates = trading_dates(&records);
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0], base() + Duration::days(2));
        assert_eq!(latest_date(&records), Some(base() + Duration::days(2)));
        assert_eq!(latest_date(&[]), None);
    }
}
