//! 원시 수치 정규화 (Normalizer).
//!
//! 서로 다른 단위의 필드를 비교 가능한 척도로 변환합니다:
//!
//! - `volume_norm = ln(1 + volume)`
//! - `imbalance_norm = clip(imbalance, -1, 1)`
//! - `foreign_ratio = foreign_buy / (foreign_sell + ε)`
//!
//! 행마다 독립적인 순수 변환이며 부작용이 없습니다.

use bandar_core::TradingRecord;
use serde::{Deserialize, Serialize};

/// 외국인 비율 계산 시 0 나눗셈 방지 epsilon.
pub const RATIO_EPSILON: f64 = 1e-6;

/// 정규화된 피처.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFeatures {
    pub volume_norm: f64,
    pub imbalance_norm: f64,
    pub foreign_ratio: f64,
}

impl NormalizedFeatures {
    /// z-score 대상 외국인 피처: `ln(1 + foreign_ratio)`.
    pub fn foreign_log_ratio(&self) -> f64 {
        self.foreign_ratio.ln_1p()
    }
}

/// 정규화기.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    epsilon: f64,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(RATIO_EPSILON)
    }
}

impl Normalizer {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// 한 행을 정규화합니다.
    pub fn normalize(&self, record: &TradingRecord) -> NormalizedFeatures {
        NormalizedFeatures {
            volume_norm: (record.volume as f64).ln_1p(),
            imbalance_norm: record.imbalance.clamp(-1.0, 1.0),
            foreign_ratio: record.foreign_buy_f64() / (record.foreign_sell_f64() + self.epsilon),
        }
    }

    /// 행 집합 전체를 정규화합니다 (입력 순서 유지).
    pub fn normalize_all(&self, records: &[TradingRecord]) -> Vec<NormalizedFeatures> {
        records.iter().map(|r| self.normalize(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandar_core::FinalSignal;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn record(volume: u64, imbalance: f64, buy: Decimal, sell: Decimal) -> TradingRecord {
        TradingRecord::new(
            "XYZ",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            volume,
            imbalance,
            buy,
            sell,
            FinalSignal::Netral,
        )
    }

    #[test]
    fn test_volume_log_transform() {
        let n = Normalizer::default();
        assert_eq!(n.normalize(&record(0, 0.0, dec!(1), dec!(1))).volume_norm, 0.0);
        let f = n.normalize(&record(1_000_000, 0.0, dec!(1), dec!(1)));
        assert!((f.volume_norm - 1_000_001f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_imbalance_clipped() {
        let n = Normalizer::default();
        assert_eq!(n.normalize(&record(1, 1.7, dec!(1), dec!(1))).imbalance_norm, 1.0);
        assert_eq!(n.normalize(&record(1, -3.0, dec!(1), dec!(1))).imbalance_norm, -1.0);
        assert_eq!(n.normalize(&record(1, 0.25, dec!(1), dec!(1))).imbalance_norm, 0.25);
    }

    #[test]
    fn test_zero_foreign_sell_is_finite() {
        let n = Normalizer::default();
        let f = n.normalize(&record(1, 0.0, dec!(5000000000), Decimal::ZERO));
        assert!(f.foreign_ratio.is_finite());
        assert!(f.foreign_ratio > 1e15);
        assert!(f.foreign_log_ratio().is_finite());
    }

    #[test]
    fn test_foreign_ratio() {
        let n = Normalizer::default();
        let f = n.normalize(&record(1, 0.0, dec!(10000000000), dec!(2000000000)));
        assert!((f.foreign_ratio - 5.0).abs() < 1e-9);
    }
}
