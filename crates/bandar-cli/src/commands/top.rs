//! 상위 종목 (Top Picks).

use anyhow::Result;
use bandar_analytics::top_picks;

use crate::context::AppContext;
use crate::output::{emit, format_rows_table};

/// 상위 종목 설정.
#[derive(Debug, Default)]
pub struct TopConfig {
    pub date: Option<String>,
    pub sectors: Vec<String>,
    /// 표시 개수 (없으면 설정의 top_n)
    pub limit: Option<usize>,
}

/// 강도 점수 상위 종목을 출력합니다.
pub fn run_top(ctx: &AppContext, config: &TopConfig) -> Result<usize> {
    let filter = ctx.filter(config.date.as_deref(), &config.sectors)?;
    let table = ctx.analyze(&filter);
    let limit = config.limit.unwrap_or(ctx.config.dashboard.top_n);

    let picks = top_picks(&table.rows, limit);
    let mut content = format!("🔥 Top {} ({})\n\n", limit, filter.describe());
    content.push_str(&format_rows_table(&picks));
    emit(&content, None)?;
    Ok(picks.len())
}
