//! 데이터셋 및 데이터 소스 추상화.
//!
//! 데이터 가져오기는 파이프라인 외부의 협력자 역할입니다.
//! 소스는 유효한 테이블 또는 명시적인 "데이터 없음" 신호를 돌려주며,
//! 후자는 예외가 아니라 빈 결과로 전달됩니다.

use bandar_core::{RowIssue, TradingRecord};
use serde::Serialize;

use crate::error::Result;

/// 수집이 끝난 입력 테이블.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    /// 데이터셋 버전 (캐시 키). 같은 버전이면 같은 내용입니다.
    pub version: String,
    pub records: Vec<TradingRecord>,
    /// 수집 중 발견된 셀 단위 문제
    pub issues: Vec<RowIssue>,
    /// 무시된(재계산 대상) 파생 컬럼
    pub ignored_columns: Vec<String>,
}

impl Dataset {
    pub fn new(version: impl Into<String>, records: Vec<TradingRecord>) -> Self {
        Self {
            version: version.into(),
            records,
            issues: Vec::new(),
            ignored_columns: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 버려진 행 수.
    pub fn rejected_rows(&self) -> usize {
        self.issues.iter().filter(|i| i.rejected).count()
    }

    /// 중립값으로 대체된 행 수.
    pub fn degraded_rows(&self) -> usize {
        self.records.iter().filter(|r| r.degraded).count()
    }
}

/// 가져오기 결과.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Table(Dataset),
    /// 데이터 없음 (빈 결과로 처리)
    NoData,
}

impl FetchOutcome {
    /// 데이터 없음이면 빈 데이터셋으로 변환합니다.
    pub fn into_dataset(self) -> Dataset {
        match self {
            FetchOutcome::Table(dataset) => dataset,
            FetchOutcome::NoData => Dataset::default(),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, FetchOutcome::NoData)
    }
}

/// 데이터 소스.
pub trait DataSource {
    /// 소스 이름 (로그 표시용).
    fn name(&self) -> &str;

    /// 데이터를 가져옵니다.
    fn fetch(&self) -> Result<FetchOutcome>;
}
