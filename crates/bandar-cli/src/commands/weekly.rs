//! 주간(Week-by-Week) 분석.

use anyhow::Result;
use bandar_analytics::{
    foreign_flow_weekly, sector_weekly, stock_weekly, ForeignFlowWeek, SectorWeek, StockWeek,
    WeeklyMetric,
};

use crate::context::AppContext;
use crate::output::{emit, rupiah_billions};

/// 섹터별 주간 지표를 출력합니다.
pub fn run_sector_weekly(ctx: &AppContext, metric: WeeklyMetric) -> Result<usize> {
    let weeks = sector_weekly(&ctx.dataset.records);
    emit(&render_sector(&weeks, metric), None)?;
    Ok(weeks.len())
}

/// 종목의 주간 가격/거래량/빈도와 외국인 수급을 출력합니다.
pub fn run_stock_weekly(ctx: &AppContext, code: &str) -> Result<usize> {
    let weeks = stock_weekly(&ctx.dataset.records, code);
    if weeks.is_empty() {
        anyhow::bail!("종목을 찾을 수 없습니다: {}", code);
    }
    let flows = foreign_flow_weekly(&ctx.dataset.records, code);

    let mut content = render_stock(code, &weeks);
    content.push('\n');
    content.push_str(&render_foreign_flow(&flows));
    emit(&content, None)?;
    Ok(weeks.len())
}

fn metric_label(metric: WeeklyMetric) -> &'static str {
    match metric {
        WeeklyMetric::Price => "Rata-rata Harga",
        WeeklyMetric::Volume => "Total Volume",
        WeeklyMetric::Frequency => "Total Frekuensi",
    }
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

pub fn render_sector(weeks: &[SectorWeek], metric: WeeklyMetric) -> String {
    let mut out = format!("📅 섹터별 주간 {}\n\n", metric_label(metric));
    out.push_str(&format!("{:<9} {:<22} {:>18}\n", "WEEK", "SECTOR", "VALUE"));
    out.push_str(&"-".repeat(51));
    out.push('\n');
    for week in weeks {
        out.push_str(&format!(
            "{:<9} {:<22} {:>18}\n",
            week.week,
            week.sector,
            fmt_value(week.stats.metric(metric))
        ));
    }
    out
}

pub fn render_stock(code: &str, weeks: &[StockWeek]) -> String {
    let mut out = format!("📅 {} 주간 추이\n\n", code);
    out.push_str(&format!(
        "{:<9} {:>12} {:>16} {:>12} {:>5}\n",
        "WEEK", "AVG_CLOSE", "VOLUME", "FREQUENCY", "DAYS"
    ));
    out.push_str(&"-".repeat(58));
    out.push('\n');
    for week in weeks {
        let s = &week.stats;
        out.push_str(&format!(
            "{:<9} {:>12} {:>16} {:>12} {:>5}\n",
            week.week,
            s.avg_close.map(|c| c.round_dp(2).to_string()).unwrap_or_else(|| "-".to_string()),
            s.total_volume,
            s.total_frequency.map(|f| f.to_string()).unwrap_or_else(|| "-".to_string()),
            s.trading_days,
        ));
    }
    out
}

pub fn render_foreign_flow(flows: &[ForeignFlowWeek]) -> String {
    let mut out = String::from("외국인 수급 (주간)\n\n");
    out.push_str(&format!(
        "{:<9} {:>16} {:>16} {:>16}\n",
        "WEEK", "FOREIGN_BUY", "FOREIGN_SELL", "NET_FLOW"
    ));
    out.push_str(&"-".repeat(60));
    out.push('\n');
    for flow in flows {
        out.push_str(&format!(
            "{:<9} {:>16} {:>16} {:>16}\n",
            flow.week,
            rupiah_billions(flow.total_buy),
            rupiah_billions(flow.total_sell),
            rupiah_billions(flow.net_flow),
        ));
    }
    out
}
