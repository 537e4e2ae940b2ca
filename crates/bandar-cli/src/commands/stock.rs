//! 개별 종목 이력 분석.

use anyhow::Result;
use bandar_analytics::stock_history;
use bandar_core::AnalyzedRecord;

use crate::context::AppContext;
use crate::output::{emit, rupiah_billions};

/// 종목 분석 설정.
#[derive(Debug, Default)]
pub struct StockConfig {
    pub code: String,
    /// 기준일 (포함, 없으면 최신)
    pub date: Option<String>,
}

/// 기준일까지의 종목 이력을 출력합니다.
///
/// 점수는 전체 이력을 한 집합으로 계산합니다.
pub fn run_stock(ctx: &AppContext, config: &StockConfig) -> Result<usize> {
    let until = ctx.resolve_date(config.date.as_deref())?;
    let table = ctx.analyze_history();
    let history = stock_history(&table.rows, &config.code, until);

    if history.is_empty() {
        anyhow::bail!("종목을 찾을 수 없습니다: {}", config.code);
    }

    emit(&render(&config.code, &history), None)?;
    Ok(history.len())
}

/// 이력 테이블 렌더링.
pub fn render(code: &str, history: &[&AnalyzedRecord]) -> String {
    let mut out = format!("🔍 {} 일별 분석\n\n", code);
    out.push_str(&format!(
        "{:<12} {:>10} {:>14} {:>12} {:>8} {:>16} {:<25}\n",
        "DATE", "CLOSE", "VOLUME", "AVG_VOL_30", "SCORE", "NET_FOREIGN", "PATTERN"
    ));
    out.push_str(&"-".repeat(103));
    out.push('\n');

    for row in history {
        let r = &row.record;
        let d = &row.derived;
        out.push_str(&format!(
            "{:<12} {:>10} {:>14} {:>12.0} {:>8.1} {:>16} {:<25}\n",
            r.date.to_string(),
            r.close.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
            r.volume,
            d.rolling_avg_volume_30,
            d.strength_score,
            rupiah_billions(r.net_foreign_flow()),
            d.big_player_pattern.as_str(),
        ));
    }
    out
}
