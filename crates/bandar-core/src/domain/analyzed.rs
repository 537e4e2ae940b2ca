//! 분석 결과 레코드 및 테이블.
//!
//! 파이프라인은 원시 레코드 하나당 정확히 하나의 [`AnalyzedRecord`]를 만듭니다.
//! 결과 순서는 보장하지 않으며 (종목 코드, 거래일) 쌍으로 식별합니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::flow::ForeignFlow;
use super::pattern::BigPlayerPattern;
use super::record::TradingRecord;

/// 파이프라인이 계산해 덧붙이는 파생 필드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedFields {
    pub foreign_flow_direction: ForeignFlow,
    /// ln(1 + volume)
    pub volume_norm: f64,
    /// clip(imbalance, -1, 1)
    pub imbalance_norm: f64,
    /// foreign_buy / (foreign_sell + ε)
    pub foreign_ratio: f64,
    pub z_volume: f64,
    pub z_imbalance: f64,
    pub z_foreign: f64,
    pub rolling_avg_volume_30: f64,
    pub volume_spike_ratio: f64,
    pub volume_spike: bool,
    /// 0~100, 전달된 행 집합 기준으로 재조정된 점수
    pub strength_score: f64,
    pub big_player_pattern: BigPlayerPattern,
}

/// 원시 레코드 + 파생 필드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedRecord {
    #[serde(flatten)]
    pub record: TradingRecord,
    #[serde(flatten)]
    pub derived: DerivedFields,
}

impl AnalyzedRecord {
    /// (종목 코드, 거래일) 식별 키.
    pub fn key(&self) -> (&str, NaiveDate) {
        (&self.record.stock_code, self.record.date)
    }

    pub fn stock_code(&self) -> &str {
        &self.record.stock_code
    }

    pub fn date(&self) -> NaiveDate {
        self.record.date
    }

    pub fn strength_score(&self) -> f64 {
        self.derived.strength_score
    }

    pub fn pattern(&self) -> BigPlayerPattern {
        self.derived.big_player_pattern
    }
}

/// 행 단위 진단 정보.
///
/// 한 행의 문제는 배치 전체를 중단시키지 않지만, 원인은 반드시 남깁니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub stock_code: String,
    pub date: NaiveDate,
    pub message: String,
}

impl Diagnostic {
    /// 특정 행에 대한 경고를 생성합니다.
    pub fn row_warning(record: &TradingRecord, message: impl Into<String>) -> Self {
        Self {
            stock_code: record.stock_code.clone(),
            date: record.date,
            message: message.into(),
        }
    }
}

/// 분석 결과 테이블.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedTable {
    pub rows: Vec<AnalyzedRecord>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalyzedTable {
    /// 빈 테이블 ("데이터 없음" 신호의 통과 결과).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (종목 코드, 거래일)로 행을 찾습니다.
    pub fn find(&self, stock_code: &str, date: NaiveDate) -> Option<&AnalyzedRecord> {
        self.rows
            .iter()
            .find(|row| row.record.stock_code == stock_code && row.record.date == date)
    }

    /// 거래량 스파이크 행 수.
    pub fn spike_count(&self) -> usize {
        self.rows.iter().filter(|r| r.derived.volume_spike).count()
    }

    /// `Normal`이 아닌 패턴 행 수.
    pub fn flagged_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.pattern().is_normal()).count()
    }
}
