//! 분석 결과 캐시.
//!
//! `(데이터셋 버전, 필터 키)` → 분석 테이블을 보관하는 명시적 캐시 계층입니다.
//! 순수 파이프라인을 감싸기만 하며 결과를 바꾸지 않습니다.
//! 항목과 통계는 언제든 조회할 수 있습니다.
//!
//! 저장된 테이블은 불변(`Arc`)이므로 잠금이 오염(poison)되어도 맵을 그대로 복구해
//! 사용하고, 그 사실을 경고로 남깁니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bandar_core::{AnalyzedTable, TradingRecord};
use serde::Serialize;
use tracing::{debug, warn};

use crate::pipeline::{Pipeline, RowFilter};

type Entries = HashMap<CacheKey, Arc<AnalyzedTable>>;

/// 캐시 키.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CacheKey {
    /// 데이터셋 버전 (소스 식별자 + 수정 정보)
    pub version: String,
    pub filter: RowFilter,
}

impl CacheKey {
    pub fn new(version: impl Into<String>, filter: RowFilter) -> Self {
        Self {
            version: version.into(),
            filter,
        }
    }
}

/// 캐시 통계.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub hit_rate: f64,
}

/// 점수 결과 캐시.
#[derive(Debug, Default)]
pub struct ScoreCache {
    entries: RwLock<Entries>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(|poisoned| {
            warn!("캐시 잠금이 오염되었습니다. 기존 항목으로 복구합니다");
            poisoned.into_inner()
        })
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(|poisoned| {
            warn!("캐시 잠금이 오염되었습니다. 기존 항목으로 복구합니다");
            poisoned.into_inner()
        })
    }

    /// 캐시된 결과를 조회합니다.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<AnalyzedTable>> {
        let found = self.read_entries().get(key).cloned();

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// 결과를 저장합니다.
    pub fn insert(&self, key: CacheKey, table: AnalyzedTable) -> Arc<AnalyzedTable> {
        let table = Arc::new(table);
        self.write_entries().insert(key, Arc::clone(&table));
        table
    }

    /// 캐시에 있으면 반환하고, 없으면 파이프라인을 실행한 뒤 저장합니다.
    pub fn get_or_run(
        &self,
        pipeline: &Pipeline,
        version: &str,
        records: &[TradingRecord],
        filter: &RowFilter,
    ) -> Arc<AnalyzedTable> {
        let key = CacheKey::new(version, filter.clone());
        if let Some(table) = self.get(&key) {
            debug!(version, filter = %filter.describe(), "캐시 적중");
            return table;
        }

        debug!(version, filter = %filter.describe(), "캐시 미스, 파이프라인 실행");
        self.insert(key, pipeline.run_filtered(records, filter))
    }

    /// 저장된 키 목록.
    pub fn keys(&self) -> Vec<CacheKey> {
        self.read_entries().keys().cloned().collect()
    }

    /// 특정 데이터셋 버전의 항목을 모두 제거합니다. 제거된 수를 반환합니다.
    pub fn invalidate_version(&self, version: &str) -> usize {
        let mut entries = self.write_entries();
        let before = entries.len();
        entries.retain(|key, _| key.version != version);
        before - entries.len()
    }

    /// 전체 항목을 제거합니다 (통계는 유지).
    pub fn clear(&self) {
        self.write_entries().clear();
    }

    /// 캐시 통계.
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };
        let entries = self.read_entries().len();

        CacheStats {
            hits,
            misses,
            entries,
            hit_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandar_core::FinalSignal;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn records() -> Vec<TradingRecord> {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        vec![
            TradingRecord::new("AAA", date, 100, 0.1, dec!(5), dec!(1), FinalSignal::Akumulasi),
            TradingRecord::new("BBB", date, 900, -0.2, dec!(1), dec!(5), FinalSignal::Distribusi),
        ]
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = ScoreCache::new();
        let pipeline = Pipeline::default();
        let records = records();

        let first = cache.get_or_run(&pipeline, "v1", &records, &RowFilter::all());
        let second = cache.get_or_run(&pipeline, "v1", &records, &RowFilter::all());

        assert!(Arc::ptr_eq(&first, &second));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert!((stats.hit_rate - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cached_result_equals_pure_run() {
        let cache = ScoreCache::new();
        let pipeline = Pipeline::default();
        let records = records();

        let cached = cache.get_or_run(&pipeline, "v1", &records, &RowFilter::all());
        assert_eq!(*cached, pipeline.run_filtered(&records, &RowFilter::all()));
    }

    #[test]
    fn test_invalidate_version() {
        let cache = ScoreCache::new();
        let pipeline = Pipeline::default();
        let records = records();
        let day = RowFilter::on_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());

        cache.get_or_run(&pipeline, "v1", &records, &RowFilter::all());
        cache.get_or_run(&pipeline, "v1", &records, &day);
        cache.get_or_run(&pipeline, "v2", &records, &day);

        assert_eq!(cache.keys().len(), 3);
        assert_eq!(cache.invalidate_version("v1"), 2);
        assert_eq!(cache.keys(), vec![CacheKey::new("v2", day)]);

        cache.clear();
        assert!(cache.keys().is_empty());
    }

    #[test]
    fn test_poisoned_lock_keeps_entries() {
        let cache = Arc::new(ScoreCache::new());
        let pipeline = Pipeline::default();
        let records = records();
        let first = cache.get_or_run(&pipeline, "v1", &records, &RowFilter::all());

        let holder = Arc::clone(&cache);
        let joined = std::thread::spawn(move || {
            let _guard = holder.entries.write().unwrap();
            panic!("writer died while holding the lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(cache.entries.is_poisoned());

        // 오염 후에도 기존 항목 적중, 새 항목 저장
        let again = cache.get_or_run(&pipeline, "v1", &records, &RowFilter::all());
        assert!(Arc::ptr_eq(&first, &again));
        cache.get_or_run(&pipeline, "v2", &records, &RowFilter::all());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.entries, 2);
        assert_eq!(cache.invalidate_version("v1"), 1);
    }
}
