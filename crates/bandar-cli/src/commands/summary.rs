//! 시장 요약 (Ringkasan Pasar).

use anyhow::Result;
use bandar_analytics::{MarketSummary, PatternBreakdown};

use crate::context::AppContext;
use crate::output::{emit, rupiah_billions};

/// 요약 설정.
#[derive(Debug, Default)]
pub struct SummaryConfig {
    pub date: Option<String>,
    pub sectors: Vec<String>,
}

/// 시장 요약과 패턴 분포를 출력합니다.
pub fn run_summary(ctx: &AppContext, config: &SummaryConfig) -> Result<()> {
    let filter = ctx.filter(config.date.as_deref(), &config.sectors)?;
    let table = ctx.analyze(&filter);

    let summary = MarketSummary::from_rows(&table.rows);
    let breakdown = PatternBreakdown::from_rows(&table.rows);
    emit(&render(&summary, &breakdown, &filter.describe()), None)
}

/// 텍스트 렌더링.
pub fn render(summary: &MarketSummary, breakdown: &PatternBreakdown, scope: &str) -> String {
    let mut out = format!("📊 시장 요약 ({})\n\n", scope);

    if summary.rows == 0 {
        out.push_str("데이터가 없습니다.\n");
        return out;
    }

    if let (Some(net), Some(direction)) = (summary.net_foreign_flow, summary.flow_direction) {
        out.push_str(&format!(
            "  {:<22} {} ({})\n",
            "Net Foreign Flow",
            rupiah_billions(net),
            direction
        ));
    }
    out.push_str(&format!(
        "  {:<22} {}\n",
        "Akumulasi",
        summary.accumulation_count.unwrap_or(0)
    ));
    out.push_str(&format!(
        "  {:<22} {}\n",
        "Distribusi",
        summary.distribution_count.unwrap_or(0)
    ));
    out.push_str(&format!(
        "  {:<22} {}\n",
        "Volume Spike",
        summary.spike_count.unwrap_or(0)
    ));
    out.push_str(&format!(
        "  {:<22} {:.1}\n",
        "Avg Strength",
        summary.average_strength.unwrap_or(0.0)
    ));

    out.push_str("\n패턴 분포\n");
    for (pattern, count) in &breakdown.counts {
        out.push_str(&format!("  {:<26} {:>5}\n", pattern.as_str(), count));
    }
    out
}
