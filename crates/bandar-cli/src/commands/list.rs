//! 필터 선택지 조회 (섹터, 거래일, 종목 코드).

use anyhow::Result;
use bandar_analytics::{sectors, stock_codes, trading_dates};

use crate::context::AppContext;
use crate::output::{emit, to_json, OutputFormat};

/// 조회 대상.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    Sectors,
    Dates,
    Stocks,
}

impl ListTarget {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sectors" | "sector" => Ok(Self::Sectors),
            "dates" | "date" => Ok(Self::Dates),
            "stocks" | "stock" | "codes" => Ok(Self::Stocks),
            _ => Err(anyhow::anyhow!(
                "Invalid list target: {}. Use: sectors, dates, stocks",
                s
            )),
        }
    }

    fn header(&self) -> &'static str {
        match self {
            Self::Sectors => "sector",
            Self::Dates => "date",
            Self::Stocks => "stock_code",
        }
    }
}

/// 데이터셋에서 선택지를 모읍니다. 거래일은 최신순입니다.
pub fn collect(ctx: &AppContext, target: ListTarget) -> Vec<String> {
    let records = &ctx.dataset.records;
    match target {
        ListTarget::Sectors => sectors(records),
        ListTarget::Dates => trading_dates(records)
            .into_iter()
            .map(|d| d.to_string())
            .collect(),
        ListTarget::Stocks => stock_codes(records),
    }
}

pub fn run_list(ctx: &AppContext, target: ListTarget, format: OutputFormat) -> Result<usize> {
    let items = collect(ctx, target);
    emit(&render(target, &items, format)?, None)?;
    Ok(items.len())
}

pub fn render(target: ListTarget, items: &[String], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let mut out = format!("{}\n", target.header().to_uppercase());
            out.push_str(&"-".repeat(24));
            out.push('\n');
            for item in items {
                out.push_str(item);
                out.push('\n');
            }
            out.push_str(&format!("\n총 {}개", items.len()));
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut out = format!("{}\n", target.header());
            for item in items {
                out.push_str(item);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => to_json(items),
    }
}
