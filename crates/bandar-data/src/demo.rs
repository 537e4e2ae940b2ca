//! 데모 데이터 생성기.
//!
//! 입력 파일이 없을 때 대시보드를 시연하기 위한 자리표시 데이터입니다.
//! 실제 운용에서는 상위 시스템의 실제 값으로 대체해야 합니다.
//!
//! 영업일 `days`일 × IDX 10개 종목을 시드 고정 난수로 생성하므로
//! 같은 시드와 종료일이면 항상 같은 데이터셋이 만들어집니다.

use bandar_core::{FinalSignal, TradingRecord};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::info;

use crate::dataset::{DataSource, Dataset, FetchOutcome};
use crate::error::Result;

/// 데모 종목과 섹터.
pub const DEMO_STOCKS: [(&str, &str); 10] = [
    ("BBCA", "Financials"),
    ("TLKM", "Technology"),
    ("BBRI", "Financials"),
    ("ASII", "Industrials"),
    ("GOTO", "Technology"),
    ("BMRI", "Financials"),
    ("UNVR", "Consumer Staples"),
    ("ICBP", "Consumer Staples"),
    ("ADRO", "Energy"),
    ("ANTM", "Basic Materials"),
];

/// 데모 데이터 소스.
#[derive(Debug, Clone)]
pub struct DemoDataSource {
    days: usize,
    seed: u64,
    end_date: NaiveDate,
}

impl DemoDataSource {
    /// 오늘을 종료일로 하는 데모 소스.
    pub fn new(days: usize, seed: u64) -> Self {
        Self {
            days,
            seed,
            end_date: chrono::Local::now().date_naive(),
        }
    }

    /// 종료일을 지정합니다.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = end_date;
        self
    }

    /// 데이터셋을 생성합니다.
    pub fn generate(&self) -> Dataset {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let dates = business_days_until(self.end_date, self.days);

        let mut records = Vec::with_capacity(dates.len() * DEMO_STOCKS.len());
        for date in &dates {
            for (code, sector) in DEMO_STOCKS {
                let volume = rng.gen_range(1_000_000u64..100_000_000);
                let buy = rng.gen_range(1_000_000_000i64..50_000_000_000);
                let sell = rng.gen_range(1_000_000_000i64..50_000_000_000);
                let imbalance = rng.gen_range(-1.0..=1.0);
                let close = rng.gen_range(100i64..10_000);
                let frequency = rng.gen_range(500u64..20_000);
                let signal = FinalSignal::KNOWN[rng.gen_range(0..FinalSignal::KNOWN.len())].clone();

                records.push(
                    TradingRecord::new(
                        code,
                        *date,
                        volume,
                        imbalance,
                        Decimal::from(buy),
                        Decimal::from(sell),
                        signal,
                    )
                    .with_sector(sector)
                    .with_market_data(Some(Decimal::from(close)), Some(frequency)),
                );
            }
        }

        let version = format!("demo:{}:{}:{}", self.seed, self.end_date, self.days);
        info!(rows = records.len(), version = %version, "데모 데이터 생성");
        Dataset::new(version, records)
    }
}

impl DataSource for DemoDataSource {
    fn name(&self) -> &str {
        "demo"
    }

    fn fetch(&self) -> Result<FetchOutcome> {
        if self.days == 0 {
            return Ok(FetchOutcome::NoData);
        }
        Ok(FetchOutcome::Table(self.generate()))
    }
}

/// `end`(포함) 이전의 영업일 `count`개, 오름차순.
pub fn business_days_until(end: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut current = end;
    while days.len() < count {
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(current);
        }
        current -= Duration::days(1);
    }
    days.reverse();
    days
}
