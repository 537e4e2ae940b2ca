//! 데이터 모듈 오류 타입.

use bandar_core::BandarError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 스키마 위반 (필수 컬럼 누락 등). 실행 전체가 실패합니다.
    #[error(transparent)]
    Schema(#[from] BandarError),

    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV 파싱/쓰기 오류
    #[error("CSV error: {0}")]
    Csv(String),
}

impl DataError {
    /// 필수 컬럼 누락 오류인지 확인합니다.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, DataError::Schema(BandarError::MissingField(_)))
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
