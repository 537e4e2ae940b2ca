//! # Bandar Core
//!
//! 밴다르몰로지(bandarmologi) 분석의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 일별 거래 레코드 및 최종 신호(Final Signal)
//! - 외국인 수급 방향 및 빅플레이어 패턴
//! - 분석 결과 레코드 / 테이블
//! - 입력 테이블 스키마 (필수/선택 컬럼 정책)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
