//! 분석 시스템의 에러 타입.
//!
//! 이 모듈은 파이프라인 전반에서 사용되는 에러 타입을 정의합니다.
//! 퇴화 집합(빈 집합, 단일 행, 분산 0)은 에러가 아니라 정의된 대체값으로 처리됩니다.

use thiserror::Error;

/// 핵심 분석 에러.
#[derive(Debug, Error)]
pub enum BandarError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필수 컬럼 누락 (파이프라인 실행 전체가 실패)
    #[error("missing required field: {0}")]
    MissingField(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 분석 작업을 위한 Result 타입.
pub type BandarResult<T> = Result<T, BandarError>;

impl BandarError {
    /// 실행 전체를 중단해야 하는 에러인지 확인합니다.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BandarError::MissingField(_) | BandarError::Config(_))
    }
}

impl From<config::ConfigError> for BandarError {
    fn from(err: config::ConfigError) -> Self {
        BandarError::Config(err.to_string())
    }
}
