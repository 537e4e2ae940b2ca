//! 종목 비교.

use anyhow::{Context, Result};
use bandar_analytics::{compare, ComparisonEntry};

use crate::context::AppContext;
use crate::output::{emit, rupiah_billions};

/// 비교 설정.
#[derive(Debug, Default)]
pub struct CompareConfig {
    pub codes: Vec<String>,
    pub date: Option<String>,
}

/// 선택한 날짜의 종목들을 나란히 비교합니다.
pub fn run_compare(ctx: &AppContext, config: &CompareConfig) -> Result<usize> {
    let filter = ctx.filter(config.date.as_deref(), &[])?;
    let table = ctx.analyze(&filter);

    let entries = compare(&table.rows, config.codes.as_slice(), ctx.config.dashboard.compare_max)
        .context("Failed to compare stocks")?;
    emit(&render(&entries), None)?;
    Ok(entries.len())
}

/// 비교 테이블 렌더링.
pub fn render(entries: &[ComparisonEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:>8} {:<18} {:>16} {:<8}\n",
        "CODE", "SCORE", "SIGNAL", "NET_FOREIGN", "FLOW"
    ));
    out.push_str(&"-".repeat(62));
    out.push('\n');

    for entry in entries {
        out.push_str(&format!(
            "{:<8} {:>8.1} {:<18} {:>16} {:<8}\n",
            entry.stock_code,
            entry.strength_score,
            entry.final_signal.as_str(),
            rupiah_billions(entry.net_foreign_flow),
            entry.flow_direction.as_str(),
        ));
    }
    out
}
