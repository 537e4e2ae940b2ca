//! 밴다르몰로지 대시보드 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 강도 점수 / 상위 종목 / 시장 요약 출력
//! - 개별 종목 분석 및 비교
//! - 주간(Week-by-Week) 분석
//! - 데모 데이터 내보내기

pub mod commands;
pub mod context;
pub mod output;

pub use context::{AppContext, InputOptions};
pub use output::OutputFormat;
