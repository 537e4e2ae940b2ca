//! 명령 실행 컨텍스트.
//!
//! 설정, 데이터셋, 파이프라인, 결과 캐시를 묶어 각 명령에 전달합니다.

use std::sync::Arc;

use anyhow::{Context, Result};
use bandar_analytics::{latest_date, sectors, Pipeline, RowFilter, ScoreCache};
use bandar_core::{AnalyzedTable, AppConfig};
use bandar_data::{CsvDataSource, DataSource, Dataset, DemoDataSource};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// 입력 데이터 선택.
#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    /// CSV 경로 (없으면 설정값)
    pub input: Option<String>,
    /// 데모 데이터 사용
    pub demo: bool,
}

/// 명령 실행 컨텍스트.
pub struct AppContext {
    pub config: AppConfig,
    pub pipeline: Pipeline,
    pub dataset: Dataset,
    cache: ScoreCache,
}

impl AppContext {
    /// 설정과 입력 옵션으로 컨텍스트를 만듭니다.
    pub fn load(config: AppConfig, input: &InputOptions) -> Result<Self> {
        let pipeline = Pipeline::from_config(&config).context("Invalid pipeline configuration")?;

        let source: Box<dyn DataSource> = if input.demo {
            Box::new(DemoDataSource::new(config.data.demo_days, config.data.demo_seed))
        } else {
            let path = input
                .input
                .clone()
                .unwrap_or_else(|| config.data.input_path.clone());
            Box::new(CsvDataSource::new(path))
        };

        let outcome = source
            .fetch()
            .with_context(|| format!("Failed to load data from {} source", source.name()))?;
        if outcome.is_no_data() {
            warn!("데이터가 없습니다. 빈 결과를 표시합니다 (--demo로 데모 데이터 사용 가능)");
        }
        let dataset = outcome.into_dataset();
        info!(
            source = source.name(),
            rows = dataset.len(),
            issues = dataset.issues.len(),
            "데이터셋 준비 완료"
        );

        Ok(Self::from_dataset(config, pipeline, dataset))
    }

    /// 이미 준비된 데이터셋으로 컨텍스트를 만듭니다.
    pub fn from_dataset(config: AppConfig, pipeline: Pipeline, dataset: Dataset) -> Self {
        Self {
            config,
            pipeline,
            dataset,
            cache: ScoreCache::new(),
        }
    }

    /// 날짜 인자를 해석합니다. 없으면 데이터셋의 최신 거래일입니다.
    pub fn resolve_date(&self, date: Option<&str>) -> Result<Option<NaiveDate>> {
        match date {
            Some(raw) => {
                let parsed = bandar_core::parse_date(raw)
                    .map_err(|e| anyhow::anyhow!("Invalid date '{}': {}", raw, e))?;
                Ok(Some(parsed))
            }
            None => Ok(latest_date(&self.dataset.records)),
        }
    }

    /// 날짜/섹터 필터를 만듭니다.
    ///
    /// 데이터셋에 없는 섹터는 경고만 남기고 그대로 둡니다 (결과가 비게 됨).
    pub fn filter(&self, date: Option<&str>, selected: &[String]) -> Result<RowFilter> {
        let filter = RowFilter {
            date: self.resolve_date(date)?,
            sectors: Vec::new(),
        };
        if selected.is_empty() {
            return Ok(filter);
        }

        let known = sectors(&self.dataset.records);
        for sector in selected.iter().filter(|s| !known.contains(*s)) {
            warn!(sector = %sector, known = ?known, "데이터셋에 없는 섹터입니다");
        }
        Ok(filter.with_sectors(selected.iter().cloned()))
    }

    /// 필터 범위로 분석합니다 (캐시 경유).
    pub fn analyze(&self, filter: &RowFilter) -> Arc<AnalyzedTable> {
        let table = self.cache.get_or_run(
            &self.pipeline,
            &self.dataset.version,
            &self.dataset.records,
            filter,
        );
        debug!(stats = ?self.cache.stats(), "캐시 상태");
        table
    }

    /// 전체 이력을 분석합니다 (캐시 경유).
    pub fn analyze_history(&self) -> Arc<AnalyzedTable> {
        self.analyze(&RowFilter::all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn context() -> AppContext {
        let dataset = DemoDataSource::new(5, 3)
            .with_end_date(NaiveDate::from_ymd_opt(2024, 10, 4).unwrap())
            .generate();
        AppContext::from_dataset(AppConfig::default(), Pipeline::default(), dataset)
    }

    #[test]
    fn test_default_date_is_latest() {
        let ctx = context();
        assert_eq!(
            ctx.resolve_date(None).unwrap(),
            NaiveDate::from_ymd_opt(2024, 10, 4)
        );
        assert!(ctx.resolve_date(Some("04/10/2024")).is_err());
    }

    #[test]
    fn test_analyze_latest_day() {
        let ctx = context();
        let filter = ctx.filter(None, &["Financials".to_string()]).unwrap();
        let table = ctx.analyze(&filter);
        // BBCA, BBRI, BMRI
        assert_eq!(table.len(), 3);
        assert!(Arc::ptr_eq(&table, &ctx.analyze(&filter)));
    }

    #[test]
    fn test_unknown_sector_gives_empty_slice() {
        let ctx = context();
        let filter = ctx.filter(None, &["Shipping".to_string()]).unwrap();
        assert_eq!(filter.sectors, vec!["Shipping".to_string()]);
        assert!(ctx.analyze(&filter).is_empty());
    }
}
