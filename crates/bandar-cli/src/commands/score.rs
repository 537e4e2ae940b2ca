//! 강도 점수 테이블 출력.

use anyhow::{Context, Result};
use bandar_core::AnalyzedTable;

use crate::context::AppContext;
use crate::output::{emit, format_rows_table, to_json, OutputFormat};

/// 점수 조회 설정.
#[derive(Debug, Default)]
pub struct ScoreConfig {
    /// 거래일 (없으면 최신)
    pub date: Option<String>,
    /// 섹터 필터
    pub sectors: Vec<String>,
    pub format: OutputFormat,
    /// 출력 파일 경로
    pub output: Option<String>,
}

/// 필터된 슬라이스를 점수화하여 출력합니다.
pub fn run_score(ctx: &AppContext, config: &ScoreConfig) -> Result<usize> {
    let filter = ctx.filter(config.date.as_deref(), &config.sectors)?;
    let table = ctx.analyze(&filter);

    let content = render(&table, config.format)?;
    emit(&content, config.output.as_deref())?;
    Ok(table.len())
}

/// 형식별 렌더링.
pub fn render(table: &AnalyzedTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<_> = table.rows.iter().collect();
            let mut out = format_rows_table(&rows);
            for diagnostic in &table.diagnostics {
                out.push_str(&format!(
                    "\n[경고] {} {} {}",
                    diagnostic.stock_code, diagnostic.date, diagnostic.message
                ));
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            bandar_data::write_analyzed(&mut buf, table).context("Failed to write CSV")?;
            String::from_utf8(buf).context("CSV output is not valid UTF-8")
        }
        OutputFormat::Json => to_json(table),
    }
}
