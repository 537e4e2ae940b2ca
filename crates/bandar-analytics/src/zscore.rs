//! Z-Score 엔진.
//!
//! 전달된 행 집합(현재 필터 결과) 안에서 피처별 표준 점수를 계산합니다.
//! 표준편차는 모집단 기준(ddof = 0)입니다.
//!
//! 행이 2개 미만이거나 표준편차가 0(또는 정의 불가)이면 해당 컬럼의
//! 모든 z-score는 0입니다. NaN이나 에러를 내지 않습니다.

use crate::normalizer::NormalizedFeatures;

/// 세 피처의 z-score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureZScores {
    pub z_volume: f64,
    pub z_imbalance: f64,
    pub z_foreign: f64,
}

/// 한 컬럼의 z-score를 계산합니다.
pub fn zscore(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return vec![0.0; values.len()];
    }

    // 모든 값이 같으면 평균의 반올림 오차와 무관하게 분산 0
    if values.iter().all(|v| *v == values[0]) {
        return vec![0.0; values.len()];
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    // 수치적으로 0이거나 정의 불가
    if !std_dev.is_finite() || std_dev <= f64::EPSILON * mean.abs().max(1.0) {
        return vec![0.0; values.len()];
    }

    values.iter().map(|x| (x - mean) / std_dev).collect()
}

/// 정규화 피처 집합에 대한 z-score 엔진.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZScoreEngine;

impl ZScoreEngine {
    pub fn new() -> Self {
        Self
    }

    /// `volume_norm`, `imbalance_norm`, `ln(1 + foreign_ratio)`를 각각 독립적으로 표준화합니다.
    pub fn compute(&self, features: &[NormalizedFeatures]) -> Vec<FeatureZScores> {
        let volume: Vec<f64> = features.iter().map(|f| f.volume_norm).collect();
        let imbalance: Vec<f64> = features.iter().map(|f| f.imbalance_norm).collect();
        let foreign: Vec<f64> = features.iter().map(|f| f.foreign_log_ratio()).collect();

        let z_volume = zscore(&volume);
        let z_imbalance = zscore(&imbalance);
        let z_foreign = zscore(&foreign);

        (0..features.len())
            .map(|i| FeatureZScores {
                z_volume: z_volume[i],
                z_imbalance: z_imbalance[i],
                z_foreign: z_foreign[i],
            })
            .collect()
    }
}
