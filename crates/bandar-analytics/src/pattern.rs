//! 빅플레이어 / 밴다르 패턴 분류기.
//!
//! 행 단위 결정 테이블이며, 위에서부터 처음 일치하는 규칙이 적용됩니다.
//!
//! 1. spike ∧ Inflow ∧ imbalance > 0.3 → Big Player Accumulation
//! 2. spike ∧ Outflow ∧ imbalance < -0.3 → Big Player Distribution
//! 3. spike ∧ imbalance > 0.4 → Bandar Accumulation
//! 4. spike ∧ imbalance < -0.4 → Bandar Distribution
//! 5. 그 외 → Normal
//!
//! 규칙 순서가 결과를 결정하므로 순서를 바꾸면 안 됩니다.
//! 예: Inflow 스파이크에서 imbalance 0.35는 규칙 1에 먼저 걸립니다.

use bandar_core::{BigPlayerPattern, ForeignFlow, PatternConfig};

/// 분류 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternInput {
    pub volume_spike: bool,
    pub flow: ForeignFlow,
    pub imbalance: f64,
}

/// 패턴 분류기.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternClassifier {
    config: PatternConfig,
}

impl PatternClassifier {
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    /// 한 행을 분류합니다.
    ///
    /// 전체 함수: 비유한 불균형 값은 어떤 비교도 만족하지 않아 `Normal`이 됩니다.
    pub fn classify(&self, input: &PatternInput) -> BigPlayerPattern {
        if !input.volume_spike {
            return BigPlayerPattern::Normal;
        }

        let big = self.config.big_player_imbalance;
        let bandar = self.config.bandar_imbalance;

        match input.flow {
            ForeignFlow::Inflow if input.imbalance > big => BigPlayerPattern::BigPlayerAccumulation,
            ForeignFlow::Outflow if input.imbalance < -big => {
                BigPlayerPattern::BigPlayerDistribution
            }
            _ if input.imbalance > bandar => BigPlayerPattern::BandarAccumulation,
            _ if input.imbalance < -bandar => BigPlayerPattern::BandarDistribution,
            _ => BigPlayerPattern::Normal,
        }
    }
}
