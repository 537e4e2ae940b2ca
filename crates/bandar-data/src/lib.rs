//! 데이터 소스 및 입출력.
//!
//! 이 crate는 다음을 제공합니다:
//! - `DataSource` 트레이트와 "데이터 없음" 신호
//! - 스키마 검증을 거치는 로컬 CSV 소스
//! - 시드 고정 데모 데이터 생성기
//! - 원시/분석 테이블 CSV 출력

pub mod csv_source;
pub mod dataset;
pub mod demo;
pub mod error;
pub mod writer;

pub use csv_source::{read_dataset, CsvDataSource};
pub use dataset::{DataSource, Dataset, FetchOutcome};
pub use demo::{business_days_until, DemoDataSource, DEMO_STOCKS};
pub use error::{DataError, Result, Result as DataResult};
pub use writer::{
    write_analyzed, write_analyzed_csv, write_records, write_records_csv, DERIVED_HEADERS,
};
