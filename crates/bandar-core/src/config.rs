//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 모든 기본값은 점수/패턴 계산에서 쓰는 상수와 동일하므로
//! 설정 파일 없이도 `AppConfig::default()`로 실행할 수 있습니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BandarError, BandarResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 데이터 소스 설정
    pub data: DataConfig,
    /// 강도 점수 설정
    pub scoring: ScoringConfig,
    /// 거래량 스파이크 설정
    pub spike: SpikeConfig,
    /// 빅플레이어 패턴 임계값
    pub pattern: PatternConfig,
    /// 대시보드(표시) 설정
    pub dashboard: DashboardConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// 입력 CSV 경로
    pub input_path: String,
    /// 데모 데이터 영업일 수
    pub demo_days: usize,
    /// 데모 데이터 난수 시드
    pub demo_seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input_path: "hasil_gabungan.csv".to_string(),
            demo_days: 30,
            demo_seed: 42,
        }
    }
}

/// 강도 점수 설정.
///
/// `raw = w_imb*z_imb + w_vol*z_vol + w_for*z_for + 신호 보정`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// 호가 불균형 z-score 가중치
    pub imbalance_weight: f64,
    /// 거래량 z-score 가중치
    pub volume_weight: f64,
    /// 외국인 비율 z-score 가중치
    pub foreign_weight: f64,
    /// "Strong Akumulasi" 가산점
    pub strong_accumulation_bonus: f64,
    /// "Akumulasi" 가산점
    pub accumulation_bonus: f64,
    /// "Distribusi" 포함 신호 감점 (양수로 지정, 차감됨)
    pub distribution_penalty: f64,
    /// 0 나눗셈 방지용 epsilon
    pub epsilon: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            imbalance_weight: 0.4,
            volume_weight: 0.3,
            foreign_weight: 0.2,
            strong_accumulation_bonus: 1.5,
            accumulation_bonus: 0.5,
            distribution_penalty: 1.0,
            epsilon: 1e-6,
        }
    }
}

/// 거래량 스파이크 설정.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpikeConfig {
    /// 이동평균 윈도우 (레코드 수)
    pub window: usize,
    /// 평균 계산에 필요한 최소 레코드 수
    pub min_periods: usize,
    /// 스파이크 판정 배수 (초과, strict)
    pub ratio_threshold: f64,
    /// 0 나눗셈 방지용 epsilon
    pub epsilon: f64,
}

impl Default for SpikeConfig {
    fn default() -> Self {
        Self {
            window: 30,
            min_periods: 1,
            ratio_threshold: 3.0,
            epsilon: 1e-6,
        }
    }
}

/// 빅플레이어 패턴 임계값.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Big Player 규칙의 불균형 임계값 (|imbalance| 초과)
    pub big_player_imbalance: f64,
    /// Bandar 규칙의 불균형 임계값 (|imbalance| 초과)
    pub bandar_imbalance: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            big_player_imbalance: 0.3,
            bandar_imbalance: 0.4,
        }
    }
}

/// 대시보드(표시) 설정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 상위 종목 표시 개수
    pub top_n: usize,
    /// 비교 가능한 최대 종목 수
    pub compare_max: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: 25,
            compare_max: 4,
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 우선순위: 환경 변수(`BANDAR__SECTION__KEY`) > 파일 > 기본값.
    pub fn load<P: AsRef<Path>>(path: P) -> BandarResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("BANDAR")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 값의 일관성을 한 번에 검증합니다.
    pub fn validate(&self) -> BandarResult<()> {
        let spike = &self.spike;
        if spike.window == 0 {
            return Err(BandarError::Config("spike.window는 1 이상이어야 합니다".into()));
        }
        if spike.min_periods == 0 || spike.min_periods > spike.window {
            return Err(BandarError::Config(format!(
                "spike.min_periods는 1..={} 범위여야 합니다: {}",
                spike.window, spike.min_periods
            )));
        }
        if !(spike.ratio_threshold.is_finite() && spike.ratio_threshold > 0.0) {
            return Err(BandarError::Config(
                "spike.ratio_threshold는 양의 유한값이어야 합니다".into(),
            ));
        }

        for (name, eps) in [
            ("spike.epsilon", spike.epsilon),
            ("scoring.epsilon", self.scoring.epsilon),
        ] {
            if !(eps.is_finite() && eps > 0.0) {
                return Err(BandarError::Config(format!("{name}은 양수여야 합니다: {eps}")));
            }
        }

        let scoring = &self.scoring;
        let weights = [
            scoring.imbalance_weight,
            scoring.volume_weight,
            scoring.foreign_weight,
            scoring.strong_accumulation_bonus,
            scoring.accumulation_bonus,
            scoring.distribution_penalty,
        ];
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(BandarError::Config("scoring 값은 유한해야 합니다".into()));
        }

        let pattern = &self.pattern;
        if !(pattern.big_player_imbalance.is_finite() && pattern.bandar_imbalance.is_finite()) {
            return Err(BandarError::Config("pattern 임계값은 유한해야 합니다".into()));
        }

        if self.dashboard.compare_max < 2 {
            return Err(BandarError::Config(
                "dashboard.compare_max는 2 이상이어야 합니다".into(),
            ));
        }

        Ok(())
    }
}
