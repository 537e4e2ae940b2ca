//! 주간(Week-by-Week) 집계.
//!
//! 주차 라벨은 `%Y-%U` (연도-일요일 기준 주차) 형식이며 사전순이 곧 시간순입니다.

use std::collections::BTreeMap;
use std::str::FromStr;

use bandar_core::{BandarError, TradingRecord};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// 주간 차트 지표.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeeklyMetric {
    /// 평균 종가
    #[default]
    Price,
    /// 총 거래량
    Volume,
    /// 총 체결 빈도
    Frequency,
}

impl FromStr for WeeklyMetric {
    type Err = BandarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "volume" => Ok(Self::Volume),
            "frequency" => Ok(Self::Frequency),
            other => Err(BandarError::InvalidInput(format!("알 수 없는 주간 지표: {other}"))),
        }
    }
}

/// 주간 가격/거래량/빈도 집계.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeeklyStats {
    /// 종가가 있는 행의 평균 종가
    pub avg_close: Option<Decimal>,
    pub total_volume: u64,
    /// 빈도가 있는 행의 합계
    pub total_frequency: Option<u64>,
    pub trading_days: usize,
}

impl WeeklyStats {
    fn push(&mut self, record: &TradingRecord, close_sum: &mut (Decimal, u32)) {
        self.trading_days += 1;
        self.total_volume = self.total_volume.saturating_add(record.volume);
        if let Some(freq) = record.frequency {
            self.total_frequency = Some(self.total_frequency.unwrap_or(0).saturating_add(freq));
        }
        if let Some(close) = record.close {
            close_sum.0 += close;
            close_sum.1 += 1;
        }
    }

    /// 선택한 지표 값.
    pub fn metric(&self, metric: WeeklyMetric) -> Option<f64> {
        match metric {
            WeeklyMetric::Price => self.avg_close.and_then(|c| c.to_f64()),
            WeeklyMetric::Volume => Some(self.total_volume as f64),
            WeeklyMetric::Frequency => self.total_frequency.map(|f| f as f64),
        }
    }
}

/// (주차, 섹터)별 집계 행.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorWeek {
    pub week: String,
    pub sector: String,
    #[serde(flatten)]
    pub stats: WeeklyStats,
}

/// 주차별 종목 집계 행.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockWeek {
    pub week: String,
    #[serde(flatten)]
    pub stats: WeeklyStats,
}

/// 주차별 외국인 수급.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForeignFlowWeek {
    pub week: String,
    pub total_buy: Decimal,
    pub total_sell: Decimal,
    pub net_flow: Decimal,
}

/// 키별로 레코드를 모아 주간 통계를 만듭니다.
fn aggregate<'a, K, I, F>(records: I, key_of: F) -> BTreeMap<K, WeeklyStats>
where
    K: Ord,
    I: IntoIterator<Item = &'a TradingRecord>,
    F: Fn(&TradingRecord) -> K,
{
    let mut acc: BTreeMap<K, (WeeklyStats, (Decimal, u32))> = BTreeMap::new();
    for record in records {
        let (stats, close_sum) = acc.entry(key_of(record)).or_default();
        stats.push(record, close_sum);
    }

    acc.into_iter()
        .map(|(key, (mut stats, (sum, count)))| {
            if count > 0 {
                stats.avg_close = Some(sum / Decimal::from(count));
            }
            (key, stats)
        })
        .collect()
}

/// 섹터별 주간 집계 (주차, 섹터 순 정렬).
pub fn sector_weekly(records: &[TradingRecord]) -> Vec<SectorWeek> {
    aggregate(records, |r| (r.week_key(), r.sector.clone()))
        .into_iter()
        .map(|((week, sector), stats)| SectorWeek { week, sector, stats })
        .collect()
}

/// 한 종목의 주간 집계 (주차순).
pub fn stock_weekly(records: &[TradingRecord], stock_code: &str) -> Vec<StockWeek> {
    let filtered = records.iter().filter(|r| r.stock_code == stock_code);
    aggregate(filtered, |r| r.week_key())
        .into_iter()
        .map(|(week, stats)| StockWeek { week, stats })
        .collect()
}

/// 한 종목의 주간 외국인 매수/매도/순매수 (주차순).
pub fn foreign_flow_weekly(records: &[TradingRecord], stock_code: &str) -> Vec<ForeignFlowWeek> {
    let mut acc: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for record in records.iter().filter(|r| r.stock_code == stock_code) {
        let entry = acc.entry(record.week_key()).or_default();
        entry.0 += record.foreign_buy;
        entry.1 += record.foreign_sell;
    }

    acc.into_iter()
        .map(|(week, (buy, sell))| ForeignFlowWeek {
            week,
            total_buy: buy,
            total_sell: sell,
            net_flow: buy - sell,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandar_core::FinalSignal;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record(
        code: &str,
        sector: &str,
        ymd: (i32, u32, u32),
        close: Option<Decimal>,
    ) -> TradingRecord {
        TradingRecord::new(
            code,
            NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            1_000,
            0.0,
            dec!(300),
            dec!(100),
            FinalSignal::Netral,
        )
        .with_sector(sector)
        .with_market_data(close, Some(10))
    }

    fn records() -> Vec<TradingRecord> {
        // 2024-07-22(월) ~ 07-26(금): 2024-29주, 07-29(월): 2024-30주
        vec![
            record("BBCA", "Finance", (2024, 7, 22), Some(dec!(100))),
            record("BBCA", "Finance", (2024, 7, 26), Some(dec!(200))),
            record("BBRI", "Finance", (2024, 7, 26), None),
            record("BBCA", "Finance", (2024, 7, 29), Some(dec!(300))),
            record("ADRO", "Energy", (2024, 7, 29), Some(dec!(50))),
        ]
    }

    #[test]
    fn test_sector_weekly() {
        let weeks = sector_weekly(&records());
        assert_eq!(weeks.len(), 3);
        assert_eq!((weeks[0].week.as_str(), weeks[0].sector.as_str()), ("2024-29", "Finance"));
        assert_eq!(weeks[0].stats.avg_close, Some(dec!(150)));
        assert_eq!(weeks[0].stats.total_volume, 3_000);
        assert_eq!(weeks[0].stats.total_frequency, Some(30));
        assert_eq!((weeks[1].week.as_str(), weeks[1].sector.as_str()), ("2024-30", "Energy"));
    }

    #[test]
    fn test_stock_weekly() {
        let weeks = stock_weekly(&records(), "BBCA");
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].stats.trading_days, 2);
        assert_eq!(weeks[1].stats.avg_close, Some(dec!(300)));
        assert_eq!(weeks[1].stats.metric(WeeklyMetric::Volume), Some(1_000.0));
        assert!(stock_weekly(&records(), "NONE").is_empty());
    }

    #[test]
    fn test_missing_close_gives_no_average() {
        let weeks = stock_weekly(&records(), "BBRI");
        assert_eq!(weeks[0].stats.avg_close, None);
        assert_eq!(weeks[0].stats.metric(WeeklyMetric::Price), None);
    }

    #[test]
    fn test_foreign_flow_weekly() {
        let flows = foreign_flow_weekly(&records(), "BBCA");
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[0].week, "2024-29");
        assert_eq!(flows[0].total_buy, dec!(600));
        assert_eq!(flows[0].total_sell, dec!(200));
        assert_eq!(flows[0].net_flow, dec!(400));
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!("Volume".parse::<WeeklyMetric>().unwrap(), WeeklyMetric::Volume);
        assert!("median".parse::<WeeklyMetric>().is_err());
    }
}
