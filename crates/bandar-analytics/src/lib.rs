//! 강도 점수 및 빅플레이어 패턴 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 원시 수치 정규화 및 z-score 계산
//! - 강도 점수 (0~100, 행 집합 상대 재조정)
//! - 종목별 30기간 거래량 스파이크 탐지
//! - 빅플레이어 / 밴다르 패턴 분류
//! - 파이프라인 오케스트레이터와 명시적 결과 캐시
//! - 대시보드용 집계 (시장 요약, 상위 종목, 비교, 주간 분석)
//!
//! # 사용 예
//!
//! ```ignore
//! use bandar_analytics::{Pipeline, RowFilter};
//!
//! let pipeline = Pipeline::from_config(&config)?;
//! let table = pipeline.run_filtered(&dataset.records, &RowFilter::on_date(date));
//! ```

pub mod cache;
pub mod error;
pub mod normalizer;
pub mod pattern;
pub mod pipeline;
pub mod ranking;
pub mod strength;
pub mod summary;
pub mod volume_spike;
pub mod weekly;
pub mod zscore;

pub use cache::{CacheKey, CacheStats, ScoreCache};
pub use error::{PipelineError, PipelineResult};
pub use normalizer::{NormalizedFeatures, Normalizer, RATIO_EPSILON};
pub use pattern::{PatternClassifier, PatternInput};
pub use pipeline::{Pipeline, RowFilter};
pub use ranking::{
    compare, latest_date, sectors, stock_codes, stock_history, top_picks, trading_dates,
    ComparisonEntry,
};
pub use strength::StrengthScorer;
pub use summary::{MarketSummary, PatternBreakdown};
pub use volume_spike::{SpikeMeasure, VolumeSpikeDetector};
pub use weekly::{
    foreign_flow_weekly, sector_weekly, stock_weekly, ForeignFlowWeek, SectorWeek, StockWeek,
    WeeklyMetric, WeeklyStats,
};
pub use zscore::{zscore, FeatureZScores, ZScoreEngine};
