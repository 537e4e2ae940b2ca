//! 파이프라인 시나리오 테스트
//!
//! 대표적인 입력에 대해 파생 필드 전체 흐름을 검증

use bandar_analytics::{top_picks, MarketSummary, Pipeline, PipelineError, RowFilter, ScoreCache};
use bandar_core::{
    BandarError, BigPlayerPattern, Column, FinalSignal, ForeignFlow, TableSchema, TradingRecord,
};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
}

/// XYZ 종목의 소량 거래 29일 + 대량 거래 1일.
fn xyz_history() -> Vec<TradingRecord> {
    let mut records: Vec<_> = (0..29)
        .map(|d| {
            TradingRecord::new(
                "XYZ",
                base() + Duration::days(d),
                10_000,
                0.05,
                dec!(1000000000),
                dec!(1000000000),
                FinalSignal::Netral,
            )
        })
        .collect();
    records.push(TradingRecord::new(
        "XYZ",
        base() + Duration::days(29),
        1_000_000,
        0.5,
        dec!(10000000000),
        dec!(2000000000),
        FinalSignal::StrongAkumulasi,
    ));
    records
}

#[test]
fn xyz_spike_is_big_player_accumulation() {
    let table = Pipeline::default().run(&xyz_history());
    assert_eq!(table.len(), 30);

    let row = table.find("XYZ", base() + Duration::days(29)).unwrap();
    assert!(row.derived.volume_spike);
    assert!(row.derived.volume_spike_ratio > 3.0);
    assert_eq!(row.derived.foreign_flow_direction, ForeignFlow::Inflow);
    assert_eq!(row.pattern(), BigPlayerPattern::BigPlayerAccumulation);
    // 최고 원점수 행은 100에 수렴
    assert!((row.strength_score() - 100.0).abs() < 1e-3);

    let others = table.rows.iter().filter(|r| r.date() < base() + Duration::days(29));
    for other in others {
        assert_eq!(other.pattern(), BigPlayerPattern::Normal);
    }
}

#[test]
fn inflow_spike_at_035_prefers_big_player_rule() {
    let mut records = xyz_history();
    if let Some(last) = records.last_mut() {
        last.imbalance = 0.35;
    }
    let table = Pipeline::default().run(&records);
    let row = table.find("XYZ", base() + Duration::days(29)).unwrap();
    assert_eq!(row.pattern(), BigPlayerPattern::BigPlayerAccumulation);
}

#[test]
fn zero_foreign_sell_yields_finite_ratio() {
    let records = vec![
        TradingRecord::new(
            "AAA",
            base(),
            500,
            0.1,
            dec!(2500000000),
            Decimal::ZERO,
            FinalSignal::Akumulasi,
        ),
        TradingRecord::new(
            "BBB",
            base(),
            700,
            -0.1,
            dec!(1),
            dec!(1),
            FinalSignal::Netral,
        ),
    ];
    let table = Pipeline::default().run(&records);
    let row = table.find("AAA", base()).unwrap();
    assert!(row.derived.foreign_ratio.is_finite());
    assert!(row.derived.foreign_ratio > 1e12);
    assert!(row.derived.z_foreign.is_finite());
}

#[test]
fn identical_rows_score_the_same_constant_near_zero() {
    let records: Vec<_> = ["AAA", "BBB", "CCC", "DDD"]
        .iter()
        .map(|code| {
            TradingRecord::new(
                *code,
                base(),
                1_000,
                0.2,
                dec!(5),
                dec!(5),
                FinalSignal::Akumulasi,
            )
        })
        .collect();

    let table = Pipeline::default().run(&records);
    let first = table.rows[0].strength_score();
    assert!(first.abs() < 1e-6);
    assert!(table.rows.iter().all(|r| r.strength_score() == first));
}

#[test]
fn empty_input_passes_through() {
    let pipeline = Pipeline::default();
    let table = pipeline.run(&[]);
    assert!(table.is_empty());
    assert!(table.diagnostics.is_empty());
    assert_eq!(MarketSummary::from_rows(&table.rows).net_foreign_flow, None);
}

#[test]
fn filtered_scores_are_relative_to_the_slice() {
    let mut records = xyz_history();
    records.push(TradingRecord::new(
        "ABC",
        base() + Duration::days(29),
        20_000,
        -0.3,
        dec!(1),
        dec!(9),
        FinalSignal::Distribusi,
    ));
    let day = base() + Duration::days(29);
    let pipeline = Pipeline::default();

    let full = pipeline.run(&records);
    let slice = pipeline.run_filtered(&records, &RowFilter::on_date(day));

    assert_eq!(slice.len(), 2);
    // 스파이크는 전체 이력 기준이므로 동일
    let in_full = full.find("XYZ", day).unwrap();
    let in_slice = slice.find("XYZ", day).unwrap();
    assert_eq!(in_full.derived.volume_spike_ratio, in_slice.derived.volume_spike_ratio);
    // 점수는 슬라이스 기준으로 재조정
    assert_eq!(slice.find("ABC", day).unwrap().strength_score(), 0.0);
    assert_eq!(top_picks(&slice.rows, 1)[0].stock_code(), "XYZ");
}

#[test]
fn cache_wraps_pipeline_without_changing_results() {
    let records = xyz_history();
    let cache = ScoreCache::new();
    let pipeline = Pipeline::default();
    let filter = RowFilter::on_date(base() + Duration::days(29));

    let cached = cache.get_or_run(&pipeline, "xyz@1", &records, &filter);
    assert_eq!(*cached, pipeline.run_filtered(&records, &filter));
    cache.get_or_run(&pipeline, "xyz@1", &records, &filter);
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn missing_required_column_is_a_named_failure() {
    let headers: Vec<&str> = Column::ALL
        .iter()
        .filter(|c| **c != Column::ForeignSell)
        .map(|c| c.header())
        .collect();

    let err: PipelineError = TableSchema::new()
        .validate_headers(&headers)
        .map_err(PipelineError::from)
        .unwrap_err();
    assert!(matches!(err, PipelineError::Core(BandarError::MissingField(_))));
    assert_eq!(err.to_string(), "missing required field: Foreign Sell");
}

#[test]
fn blank_volume_cells_do_not_fake_a_spike() {
    let headers = [
        "Stock Code",
        "Last Trading Date",
        "Sector",
        "Company Name",
        "Volume",
        "Bid/Offer Imbalance",
        "Foreign Buy",
        "Foreign Sell",
        "Final Signal",
    ];
    let schema = TableSchema::new();
    let map = schema.validate_headers(&headers).unwrap();

    // 정상 5일, 거래량 공란 19일, 정상 1일
    let records: Vec<TradingRecord> = (0..25)
        .map(|d| {
            let date = (base() + Duration::days(d)).to_string();
            let volume = if (5..24).contains(&d) { "" } else { "1000000" };
            let cells = [
                "XYZ",
                date.as_str(),
                "Finance",
                "XYZ Tbk.",
                volume,
                "0.5",
                "10000000000",
                "2000000000",
                "Strong Akumulasi",
            ];
            schema
                .record_from_cells(&map, d as usize, &cells)
                .record
                .unwrap()
        })
        .collect();
    assert_eq!(records.iter().filter(|r| r.degraded).count(), 19);

    let table = Pipeline::default().run(&records);
    let last = table.find("XYZ", base() + Duration::days(24)).unwrap();
    assert_eq!(last.derived.rolling_avg_volume_30, 1_000_000.0);
    assert!(!last.derived.volume_spike);
    assert_eq!(last.pattern(), BigPlayerPattern::Normal);
    assert_eq!(table.diagnostics.len(), 19);
}
