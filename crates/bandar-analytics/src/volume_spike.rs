//! 거래량 스파이크 탐지기.
//!
//! 종목별로 행을 묶고 거래일 오름차순으로 정렬한 뒤, 현재 행을 포함한
//! 직전 최대 `window`개 레코드의 평균 거래량(trailing mean)을 구합니다.
//!
//! - `ratio = volume / (rolling_avg + ε)`
//! - `spike = ratio > threshold` (strict)
//!
//! 윈도우는 현재 행에서 끝나므로 미래 데이터를 사용하지 않으며,
//! 서로 다른 종목의 레코드는 서로의 윈도우에 영향을 주지 않습니다.
//! 필터 이전의 전체 이력에 대해 실행해야 합니다.
//!
//! `degraded` 행의 거래량은 결측으로 취급합니다. 윈도우 자리는 차지하지만
//! 평균과 `min_periods` 계산에서는 빠지며, 해당 행 자체는 비율이 없고 스파이크가 아닙니다.

use std::collections::HashMap;

use bandar_core::{SpikeConfig, TradingRecord};

/// 한 행의 스파이크 측정값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpikeMeasure {
    /// 이동평균 거래량 (`min_periods` 미달이면 None)
    pub rolling_avg: Option<f64>,
    /// 거래량 / (이동평균 + ε)
    pub ratio: Option<f64>,
    pub spike: bool,
}

impl SpikeMeasure {
    fn undefined() -> Self {
        Self {
            rolling_avg: None,
            ratio: None,
            spike: false,
        }
    }
}

/// 거래량 스파이크 탐지기.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeSpikeDetector {
    config: SpikeConfig,
}

impl VolumeSpikeDetector {
    pub fn new(config: SpikeConfig) -> Self {
        Self { config }
    }

    /// 전체 이력에 대해 스파이크를 계산합니다.
    ///
    /// 반환 벡터는 입력 슬라이스와 같은 인덱스로 정렬됩니다.
    pub fn detect(&self, records: &[TradingRecord]) -> Vec<SpikeMeasure> {
        let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            groups.entry(record.stock_code.as_str()).or_default().push(idx);
        }

        let mut measures = vec![SpikeMeasure::undefined(); records.len()];
        for indices in groups.values_mut() {
            // 안정 정렬: 같은 날짜는 입력 순서 유지
            indices.sort_by_key(|&i| records[i].date);
            let volumes: Vec<Option<f64>> = indices
                .iter()
                .map(|&i| (!records[i].degraded).then_some(records[i].volume as f64))
                .collect();

            for (pos, &idx) in indices.iter().enumerate() {
                measures[idx] = self.measure_at(&volumes, pos);
            }
        }

        tracing::debug!(
            instruments = groups.len(),
            spikes = measures.iter().filter(|m| m.spike).count(),
            "거래량 스파이크 계산 완료"
        );
        measures
    }

    /// 정렬된 거래량 시리즈의 `pos` 위치 측정값.
    fn measure_at(&self, volumes: &[Option<f64>], pos: usize) -> SpikeMeasure {
        let window = self.config.window.max(1);
        let start = (pos + 1).saturating_sub(window);
        let observed: Vec<f64> = volumes[start..=pos].iter().flatten().copied().collect();

        if observed.is_empty() || observed.len() < self.config.min_periods {
            return SpikeMeasure::undefined();
        }

        let avg = observed.iter().sum::<f64>() / observed.len() as f64;
        let Some(volume) = volumes[pos] else {
            return SpikeMeasure {
                rolling_avg: Some(avg),
                ratio: None,
                spike: false,
            };
        };

        let ratio = volume / (avg + self.config.epsilon);
        SpikeMeasure {
            rolling_avg: Some(avg),
            ratio: Some(ratio),
            spike: ratio > self.config.ratio_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandar_core::FinalSignal;
    use chrono::{Duration, NaiveDate};
    use rust_decimal_macros::dec;

    fn record(code: &str, day: i64, volume: u64) -> TradingRecord {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        TradingRecord::new(
            code,
            base + Duration::days(day),
            volume,
            0.0,
            dec!(1),
            dec!(1),
            FinalSignal::Netral,
        )
    }

    #[test]
    fn test_first_record_is_its_own_average() {
        let measures = VolumeSpikeDetector::default().detect(&[record("AAA", 0, 500)]);
        assert_eq!(measures[0].rolling_avg, Some(500.0));
        assert!(!measures[0].spike);
    }

    #[test]
    fn test_window_includes_current_record() {
        let mut records: Vec<_> = (0..29).map(|d| record("XYZ", d, 1_000)).collect();
        records.push(record("XYZ", 29, 1_000_000));

        let measures = VolumeSpikeDetector::default().detect(&records);
        let last = measures[29];
        let expected_avg = (29.0 * 1_000.0 + 1_000_000.0) / 30.0;
        assert!((last.rolling_avg.unwrap() - expected_avg).abs() < 1e-6);
        assert!(last.spike);
        assert!(measures[..29].iter().all(|m| !m.spike));
    }

    #[test]
    fn test_window_drops_old_records() {
        // 40일치: 처음 10일은 대량 거래, 이후 30일은 소량
        let mut records: Vec<_> = (0..10).map(|d| record("AAA", d, 1_000_000)).collect();
        records.extend((10..40).map(|d| record("AAA", d, 100)));

        let measures = VolumeSpikeDetector::default().detect(&records);
        assert_eq!(measures[39].rolling_avg, Some(100.0));
    }

    #[test]
    fn test_unsorted_input_is_aligned_to_input_index() {
        let records = vec![
            record("AAA", 2, 900),
            record("AAA", 0, 100),
            record("AAA", 1, 100),
        ];
        let measures = VolumeSpikeDetector::default().detect(&records);

        // 날짜순: 100, 100, 900 -> 마지막 평균 = 1100/3
        assert!((measures[0].rolling_avg.unwrap() - 1100.0 / 3.0).abs() < 1e-9);
        assert_eq!(measures[1].rolling_avg, Some(100.0));
        assert_eq!(measures[2].rolling_avg, Some(100.0));
    }

    #[test]
    fn test_min_periods_not_met() {
        let config = SpikeConfig {
            min_periods: 3,
            ..SpikeConfig::default()
        };
        let records: Vec<_> = (0..3).map(|d| record("AAA", d, 100)).collect();
        let measures = VolumeSpikeDetector::new(config).detect(&records);

        assert_eq!(measures[0].rolling_avg, None);
        assert_eq!(measures[1].ratio, None);
        assert_eq!(measures[2].rolling_avg, Some(100.0));
    }

    #[test]
    fn test_degraded_volumes_are_missing_not_zero() {
        let mut records: Vec<_> = (0..5).map(|d| record("XYZ", d, 1_000_000)).collect();
        for d in 5..24 {
            let mut blank = record("XYZ", d, 0);
            blank.degraded = true;
            records.push(blank);
        }
        records.push(record("XYZ", 24, 1_000_000));

        let measures = VolumeSpikeDetector::default().detect(&records);
        let last = measures[24];
        assert_eq!(last.rolling_avg, Some(1_000_000.0));
        assert!(!last.spike);

        // 결측 행: 평균은 관측값으로, 비율은 없음
        assert_eq!(measures[10].rolling_avg, Some(1_000_000.0));
        assert_eq!(measures[10].ratio, None);
        assert!(!measures[10].spike);
    }

    #[test]
    fn test_window_of_only_degraded_rows_is_undefined() {
        let mut blank = record("AAA", 0, 0);
        blank.degraded = true;
        let measures = VolumeSpikeDetector::default().detect(&[blank]);
        assert_eq!(measures[0], SpikeMeasure::undefined());
    }

    #[test]
    fn test_zero_volume_history() {
        let records = vec![record("AAA", 0, 0), record("AAA", 1, 0)];
        let measures = VolumeSpikeDetector::default().detect(&records);
        assert_eq!(measures[1].ratio, Some(0.0));
        assert!(!measures[1].spike);
    }
}
