//! 강도 점수 (Strength Score) 계산기.
//!
//! 가중 z-score 합에 최종 신호 보정을 더한 원점수를 만든 뒤,
//! **전달된 행 집합 안에서** 0~100으로 min-max 재조정합니다.
//!
//! ```text
//! raw   = 0.4*z_imbalance + 0.3*z_volume + 0.2*z_foreign + signal_adjustment
//! score = (raw - min) / (max - min + ε) * 100
//! ```
//!
//! | 최종 신호 | 보정 |
//! |-----------|------|
//! | Strong Akumulasi | +1.5 |
//! | Akumulasi | +0.5 |
//! | "Distribusi" 포함 (대소문자 구분) | -1.0 |
//! | 그 외 (Netral 포함) | 0.0 |
//!
//! 재조정은 집합 상대적입니다. 같은 행이라도 함께 전달된 행에 따라
//! 점수가 달라지며, 범위(일별 슬라이스 vs 전체 이력)는 호출자가 정합니다.

use bandar_core::{FinalSignal, ScoringConfig};

use crate::zscore::FeatureZScores;

/// 강도 점수 계산기.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrengthScorer {
    config: ScoringConfig,
}

impl StrengthScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// 최종 신호에 따른 보정값.
    pub fn signal_adjustment(&self, signal: &FinalSignal) -> f64 {
        match signal {
            FinalSignal::StrongAkumulasi => self.config.strong_accumulation_bonus,
            FinalSignal::Akumulasi => self.config.accumulation_bonus,
            other if other.contains_distribusi() => -self.config.distribution_penalty,
            _ => 0.0,
        }
    }

    /// 한 행의 원점수.
    pub fn raw_score(&self, z: &FeatureZScores, signal: &FinalSignal) -> f64 {
        self.config.imbalance_weight * z.z_imbalance
            + self.config.volume_weight * z.z_volume
            + self.config.foreign_weight * z.z_foreign
            + self.signal_adjustment(signal)
    }

    /// 원점수 집합을 0~100으로 재조정합니다.
    ///
    /// 모든 원점수가 같으면 분모가 epsilon이 되어 전부 0이 됩니다.
    pub fn rescale(&self, raw: &[f64]) -> Vec<f64> {
        if raw.is_empty() {
            return Vec::new();
        }

        let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
        let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let denom = max - min + self.config.epsilon;

        raw.iter()
            .map(|r| ((r - min) / denom * 100.0).clamp(0.0, 100.0))
            .collect()
    }

    /// z-score와 신호 목록으로 최종 점수를 계산합니다 (입력 순서 유지).
    pub fn score_all(&self, zscores: &[FeatureZScores], signals: &[&FinalSignal]) -> Vec<f64> {
        let raw: Vec<f64> = zscores
            .iter()
            .zip(signals.iter())
            .map(|(z, s)| self.raw_score(z, s))
            .collect();
        self.rescale(&raw)
    }
}
