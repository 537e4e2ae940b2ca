//! 밴다르몰로지 분석을 위한 도메인 모델.

mod analyzed;
mod flow;
mod pattern;
mod record;
mod schema;
mod signal;

pub use analyzed::*;
pub use flow::*;
pub use pattern::*;
pub use record::*;
pub use schema::*;
pub use signal::*;
