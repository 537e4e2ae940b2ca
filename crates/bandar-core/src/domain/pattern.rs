//! 빅플레이어 / 반다르 패턴 라벨.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 대형 세력의 매매 행태를 나타내는 규칙 기반 라벨.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BigPlayerPattern {
    #[serde(rename = "Big Player Accumulation")]
    BigPlayerAccumulation,
    #[serde(rename = "Big Player Distribution")]
    BigPlayerDistribution,
    #[serde(rename = "Bandar Accumulation")]
    BandarAccumulation,
    #[serde(rename = "Bandar Distribution")]
    BandarDistribution,
    #[serde(rename = "Normal")]
    Normal,
}

impl BigPlayerPattern {
    /// 전체 라벨 (표시 순서).
    pub const ALL: [BigPlayerPattern; 5] = [
        BigPlayerPattern::BigPlayerAccumulation,
        BigPlayerPattern::BandarAccumulation,
        BigPlayerPattern::Normal,
        BigPlayerPattern::BigPlayerDistribution,
        BigPlayerPattern::BandarDistribution,
    ];

    /// 표시용 라벨.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BigPlayerAccumulation => "Big Player Accumulation",
            Self::BigPlayerDistribution => "Big Player Distribution",
            Self::BandarAccumulation => "Bandar Accumulation",
            Self::BandarDistribution => "Bandar Distribution",
            Self::Normal => "Normal",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }

    pub fn is_accumulation(&self) -> bool {
        matches!(self, Self::BigPlayerAccumulation | Self::BandarAccumulation)
    }

    pub fn is_distribution(&self) -> bool {
        matches!(self, Self::BigPlayerDistribution | Self::BandarDistribution)
    }
}

impl fmt::Display for BigPlayerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
