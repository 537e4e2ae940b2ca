//! 입력 테이블 스키마.
//!
//! 필수/선택 컬럼과 선택 컬럼의 대체 정책을 한 곳에 열거합니다.
//! 헤더 검증은 파이프라인 경계에서 한 번만 수행하고, 셀 단위 검증은
//! [`TableSchema::record_from_cells`]가 담당합니다. 이후 단계는 모든 수치가
//! 유한값이라고 가정합니다.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use super::record::TradingRecord;
use super::signal::FinalSignal;
use crate::error::{BandarError, BandarResult};

/// 입력 컬럼.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    StockCode,
    Date,
    Sector,
    CompanyName,
    Volume,
    Imbalance,
    ForeignBuy,
    ForeignSell,
    FinalSignal,
    Close,
    Frequency,
}

impl Column {
    pub const ALL: [Column; 11] = [
        Column::StockCode,
        Column::Date,
        Column::Sector,
        Column::CompanyName,
        Column::Volume,
        Column::Imbalance,
        Column::ForeignBuy,
        Column::ForeignSell,
        Column::FinalSignal,
        Column::Close,
        Column::Frequency,
    ];

    /// CSV 헤더 이름.
    pub fn header(&self) -> &'static str {
        match self {
            Column::StockCode => "Stock Code",
            Column::Date => "Last Trading Date",
            Column::Sector => "Sector",
            Column::CompanyName => "Company Name",
            Column::Volume => "Volume",
            Column::Imbalance => "Bid/Offer Imbalance",
            Column::ForeignBuy => "Foreign Buy",
            Column::ForeignSell => "Foreign Sell",
            Column::FinalSignal => "Final Signal",
            Column::Close => "Close",
            Column::Frequency => "frequency",
        }
    }
}

/// 선택 컬럼이 없을 때의 대체 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackPolicy {
    /// 값 없음(`None`)으로 둡니다. 합성하지 않습니다.
    Absent,
}

/// 컬럼 요구 수준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRequirement {
    Required,
    Optional(FallbackPolicy),
}

/// 상위 시스템이 미리 채워 보낼 수 있지만 항상 재계산되는 파생 컬럼.
pub const RECOMPUTED_COLUMNS: [&str; 5] = [
    "Strength_Score",
    "Foreign Flow",
    "Big_Player_Pattern",
    "Volume_Spike_Ratio",
    "week",
];

/// 헤더 검증 결과: 컬럼 → 셀 인덱스.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    indices: HashMap<Column, usize>,
    /// 무시된(재계산될) 파생 컬럼
    pub ignored: Vec<String>,
}

impl ColumnMap {
    pub fn index(&self, column: Column) -> Option<usize> {
        self.indices.get(&column).copied()
    }

    pub fn has(&self, column: Column) -> bool {
        self.indices.contains_key(&column)
    }
}

/// 셀 단위 문제.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowIssue {
    /// 데이터 행 번호 (헤더 제외, 0부터)
    pub row: usize,
    pub column: Column,
    pub reason: String,
    /// 행 자체가 버려졌는지 (식별 불가)
    pub rejected: bool,
}

/// 셀 변환 결과.
#[derive(Debug, Clone)]
pub struct RowOutcome {
    /// 식별 가능한 행이면 Some
    pub record: Option<TradingRecord>,
    pub issues: Vec<RowIssue>,
}

/// 입력 테이블 스키마.
#[derive(Debug, Clone)]
pub struct TableSchema {
    columns: Vec<(Column, ColumnRequirement)>,
}

impl Default for TableSchema {
    fn default() -> Self {
        let optional = ColumnRequirement::Optional(FallbackPolicy::Absent);
        Self {
            columns: Column::ALL
                .iter()
                .map(|&column| {
                    let requirement = match column {
                        Column::Close | Column::Frequency => optional,
                        _ => ColumnRequirement::Required,
                    };
                    (column, requirement)
                })
                .collect(),
        }
    }
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// 컬럼의 요구 수준.
    pub fn requirement(&self, column: Column) -> ColumnRequirement {
        self.columns
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, r)| *r)
            .unwrap_or(ColumnRequirement::Optional(FallbackPolicy::Absent))
    }

    /// 필수 컬럼 목록.
    pub fn required_columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns
            .iter()
            .filter(|(_, r)| *r == ColumnRequirement::Required)
            .map(|(c, _)| *c)
    }

    /// 헤더를 검증하고 컬럼 인덱스 맵을 만듭니다.
    ///
    /// 필수 컬럼이 하나라도 없으면 `MissingField`로 실패합니다.
    pub fn validate_headers<S: AsRef<str>>(&self, headers: &[S]) -> BandarResult<ColumnMap> {
        let mut map = ColumnMap::default();

        for (idx, header) in headers.iter().enumerate() {
            let header = header.as_ref().trim();
            if let Some((column, _)) = self.columns.iter().find(|(c, _)| c.header() == header) {
                map.indices.entry(*column).or_insert(idx);
            } else if RECOMPUTED_COLUMNS.contains(&header) {
                map.ignored.push(header.to_string());
            }
        }

        if let Some(missing) = self.required_columns().find(|c| !map.has(*c)) {
            return Err(BandarError::MissingField(missing.header().to_string()));
        }

        Ok(map)
    }

    /// 셀 문자열을 검증된 레코드로 변환합니다.
    ///
    /// - 종목 코드/거래일이 비었거나 해석 불가하면 행을 버립니다 (`rejected`).
    /// - 거래량/불균형/외국인 금액이 잘못되면 중립값(0)으로 대체하고 `degraded`로 표시합니다.
    /// - 선택 컬럼이 잘못되면 `None`으로 둡니다.
    pub fn record_from_cells<S: AsRef<str>>(
        &self,
        map: &ColumnMap,
        row: usize,
        cells: &[S],
    ) -> RowOutcome {
        let mut issues = Vec::new();
        let cell = |column: Column| {
            map.index(column)
                .and_then(|idx| cells.get(idx))
                .map(|s| s.as_ref().trim())
                .filter(|s| !s.is_empty())
        };

        let reject = |column: Column, reason: String, issues: &mut Vec<RowIssue>| {
            issues.push(RowIssue {
                row,
                column,
                reason,
                rejected: true,
            });
        };

        let stock_code = match cell(Column::StockCode) {
            Some(code) => code.to_string(),
            None => {
                reject(Column::StockCode, "종목 코드 없음".to_string(), &mut issues);
                return RowOutcome { record: None, issues };
            }
        };

        let date = match cell(Column::Date).map(parse_date) {
            Some(Ok(date)) => date,
            Some(Err(reason)) => {
                reject(Column::Date, reason, &mut issues);
                return RowOutcome { record: None, issues };
            }
            None => {
                reject(Column::Date, "거래일 없음".to_string(), &mut issues);
                return RowOutcome { record: None, issues };
            }
        };

        let mut degraded = false;
        let mut soft = |column: Column, reason: String, degrade: bool, issues: &mut Vec<RowIssue>| {
            degraded |= degrade;
            issues.push(RowIssue {
                row,
                column,
                reason,
                rejected: false,
            });
        };

        let volume = match cell(Column::Volume).map(parse_count) {
            Some(Ok(v)) => v,
            Some(Err(reason)) => {
                soft(Column::Volume, reason, true, &mut issues);
                0
            }
            None => {
                soft(Column::Volume, "값 없음".to_string(), true, &mut issues);
                0
            }
        };

        let imbalance = match cell(Column::Imbalance).map(parse_finite) {
            Some(Ok(v)) => v,
            Some(Err(reason)) => {
                soft(Column::Imbalance, reason, true, &mut issues);
                0.0
            }
            None => {
                soft(Column::Imbalance, "값 없음".to_string(), true, &mut issues);
                0.0
            }
        };

        let mut amount = |column: Column, issues: &mut Vec<RowIssue>| -> Decimal {
            match cell(column).map(parse_amount) {
                Some(Ok(v)) => v,
                Some(Err(reason)) => {
                    soft(column, reason, true, issues);
                    Decimal::ZERO
                }
                None => {
                    soft(column, "값 없음".to_string(), true, issues);
                    Decimal::ZERO
                }
            }
        };
        let foreign_buy = amount(Column::ForeignBuy, &mut issues);
        let foreign_sell = amount(Column::ForeignSell, &mut issues);

        let final_signal = match cell(Column::FinalSignal) {
            Some(label) => FinalSignal::parse(label),
            None => {
                soft(
                    Column::FinalSignal,
                    "값 없음, Netral로 처리".to_string(),
                    false,
                    &mut issues,
                );
                FinalSignal::Netral
            }
        };

        let close = match cell(Column::Close).map(parse_amount) {
            Some(Ok(v)) => Some(v),
            Some(Err(reason)) => {
                soft(Column::Close, reason, false, &mut issues);
                None
            }
            None => None,
        };

        let frequency = match cell(Column::Frequency).map(parse_count) {
            Some(Ok(v)) => Some(v),
            Some(Err(reason)) => {
                soft(Column::Frequency, reason, false, &mut issues);
                None
            }
            None => None,
        };

        let mut record = TradingRecord::new(
            stock_code,
            date,
            volume,
            imbalance,
            foreign_buy,
            foreign_sell,
            final_signal,
        )
        .with_sector(cell(Column::Sector).unwrap_or_default())
        .with_market_data(close, frequency);
        if let Some(name) = cell(Column::CompanyName) {
            record = record.with_company_name(name);
        }
        record.degraded = degraded;

        RowOutcome {
            record: Some(record),
            issues,
        }
    }
}

/// `YYYY-MM-DD` 또는 시간이 붙은 형식에서 날짜 부분을 해석합니다.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| format!("날짜 형식 오류 '{}': {}", raw, e))
}

/// 음이 아닌 정수 카운트 (`1000000.0` 같은 실수 표기 허용).
fn parse_count(raw: &str) -> Result<u64, String> {
    if let Ok(v) = raw.parse::<u64>() {
        return Ok(v);
    }
    let value = parse_finite(raw)?;
    if value < 0.0 {
        return Err(format!("음수 값: {}", raw));
    }
    Ok(value.round() as u64)
}

/// 유한한 실수.
fn parse_finite(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("숫자가 아님: '{}'", raw))?;
    if !value.is_finite() {
        return Err(format!("유한하지 않은 값: {}", raw));
    }
    Ok(value)
}

/// 음이 아닌 금액 (과학적 표기 허용).
fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .or_else(|_| {
            parse_finite(raw).and_then(|f| {
                Decimal::from_f64(f).ok_or_else(|| format!("금액 변환 실패: {}", raw))
            })
        })
        .map_err(|_| format!("금액 형식 오류: '{}'", raw))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(format!("음수 금액: {}", raw));
    }
    Ok(value)
}
