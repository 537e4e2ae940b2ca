//! 상위 시스템이 제공하는 최종 신호(Final Signal).
//!
//! 알려진 다섯 가지 값 외의 라벨도 그대로 보존합니다.
//! 감점 규칙은 라벨에 "Distribusi"가 포함되는지(대소문자 구분)로 판정하므로
//! 원본 문자열이 손실되면 안 됩니다.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 최종 신호 카테고리.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FinalSignal {
    /// 강한 매집
    StrongAkumulasi,
    /// 매집
    Akumulasi,
    /// 중립
    Netral,
    /// 분산(매도)
    Distribusi,
    /// 강한 분산
    StrongDistribusi,
    /// 그 외 상위 시스템 라벨 (원문 보존)
    Other(String),
}

impl FinalSignal {
    /// 알려진 다섯 가지 신호.
    pub const KNOWN: [FinalSignal; 5] = [
        FinalSignal::StrongAkumulasi,
        FinalSignal::Akumulasi,
        FinalSignal::Netral,
        FinalSignal::Distribusi,
        FinalSignal::StrongDistribusi,
    ];

    /// 라벨 문자열에서 파싱합니다. 앞뒤 공백만 제거하고 대소문자는 그대로 비교합니다.
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Strong Akumulasi" => Self::StrongAkumulasi,
            "Akumulasi" => Self::Akumulasi,
            "Netral" => Self::Netral,
            "Distribusi" => Self::Distribusi,
            "Strong Distribusi" => Self::StrongDistribusi,
            other => Self::Other(other.to_string()),
        }
    }

    /// 표시용 라벨.
    pub fn as_str(&self) -> &str {
        match self {
            Self::StrongAkumulasi => "Strong Akumulasi",
            Self::Akumulasi => "Akumulasi",
            Self::Netral => "Netral",
            Self::Distribusi => "Distribusi",
            Self::StrongDistribusi => "Strong Distribusi",
            Self::Other(label) => label,
        }
    }

    /// 라벨에 "Distribusi"가 포함되는지 (대소문자 구분).
    pub fn contains_distribusi(&self) -> bool {
        self.as_str().contains("Distribusi")
    }

    /// 매집 계열 신호인지 (대소문자 무시). 시장 요약 집계에 사용합니다.
    pub fn is_accumulation_like(&self) -> bool {
        self.as_str().to_lowercase().contains("akumulasi")
    }

    /// 분산 계열 신호인지 (대소문자 무시). 시장 요약 집계에 사용합니다.
    pub fn is_distribution_like(&self) -> bool {
        self.as_str().to_lowercase().contains("distribusi")
    }
}

impl Default for FinalSignal {
    fn default() -> Self {
        Self::Netral
    }
}

impl fmt::Display for FinalSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FinalSignal {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl Serialize for FinalSignal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FinalSignal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(&label))
    }
}
