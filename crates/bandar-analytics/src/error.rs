//! 파이프라인 에러 타입.

use bandar_core::BandarError;
use thiserror::Error;

/// 분석 파이프라인 에러.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 핵심 도메인 에러 (필수 컬럼 누락 등)
    #[error(transparent)]
    Core(#[from] BandarError),

    /// 잘못된 설정
    #[error("잘못된 파이프라인 설정: {0}")]
    InvalidConfig(String),

    /// 잘못된 조회 요청
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 파이프라인 결과 타입.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_is_preserved() {
        let err: PipelineError = BandarError::MissingField("Foreign Buy".to_string()).into();
        assert_eq!(err.to_string(), "missing required field: Foreign Buy");
    }
}
