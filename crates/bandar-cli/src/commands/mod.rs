//! CLI 명령어 구현 모듈.

pub mod compare;
pub mod demo;
pub mod list;
pub mod score;
pub mod stock;
pub mod summary;
pub mod top;
pub mod weekly;
