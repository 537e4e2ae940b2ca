//! 시장 요약 및 패턴 분포.

use bandar_core::{AnalyzedRecord, BigPlayerPattern, ForeignFlow};
use rust_decimal::Decimal;
use serde::Serialize;

/// 행 집합의 시장 요약.
///
/// 빈 집합이면 모든 값 필드가 `None`입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketSummary {
    pub rows: usize,
    /// 외국인 순매수 합계 (Σ 매수 - 매도)
    pub net_foreign_flow: Option<Decimal>,
    /// 순매수 합계가 양수면 Inflow
    pub flow_direction: Option<ForeignFlow>,
    /// 최종 신호에 "akumulasi"가 포함된 행 수 (대소문자 무시)
    pub accumulation_count: Option<usize>,
    /// 최종 신호에 "distribusi"가 포함된 행 수 (대소문자 무시)
    pub distribution_count: Option<usize>,
    pub spike_count: Option<usize>,
    pub average_strength: Option<f64>,
}

impl MarketSummary {
    /// 분석 행 집합으로 요약을 계산합니다.
    pub fn from_rows(rows: &[AnalyzedRecord]) -> Self {
        if rows.is_empty() {
            return Self::default();
        }

        let net: Decimal = rows.iter().map(|r| r.record.net_foreign_flow()).sum();
        let direction = if net > Decimal::ZERO {
            ForeignFlow::Inflow
        } else {
            ForeignFlow::Outflow
        };
        let accumulation = rows
            .iter()
            .filter(|r| r.record.final_signal.is_accumulation_like())
            .count();
        let distribution = rows
            .iter()
            .filter(|r| r.record.final_signal.is_distribution_like())
            .count();
        let spikes = rows.iter().filter(|r| r.derived.volume_spike).count();
        let avg = rows.iter().map(|r| r.strength_score()).sum::<f64>() / rows.len() as f64;

        Self {
            rows: rows.len(),
            net_foreign_flow: Some(net),
            flow_direction: Some(direction),
            accumulation_count: Some(accumulation),
            distribution_count: Some(distribution),
            spike_count: Some(spikes),
            average_strength: Some(avg),
        }
    }
}

/// 패턴별 행 수.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternBreakdown {
    pub counts: Vec<(BigPlayerPattern, usize)>,
}

impl PatternBreakdown {
    /// 모든 패턴을 고정 순서로 집계합니다 (0건 포함).
    pub fn from_rows(rows: &[AnalyzedRecord]) -> Self {
        let counts = BigPlayerPattern::ALL
            .iter()
            .map(|p| (*p, rows.iter().filter(|r| r.pattern() == *p).count()))
            .collect();
        Self { counts }
    }

    pub fn count(&self, pattern: BigPlayerPattern) -> usize {
        self.counts
            .iter()
            .find(|(p, _)| *p == pattern)
            .map_or(0, |(_, c)| *c)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}
