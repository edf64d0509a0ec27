//! Keyed memoization of fetched series

use hydro_api::TimeseriesQuery;
use hydro_core::Observation;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The full query is the cache key: two fetches with the same series id,
/// parameter, granularity, and date range are interchangeable.
pub type SeriesKey = TimeseriesQuery;

/// Memoization map for normalized series.
///
/// Unlike an ever-growing string-keyed object, this cache has an explicit
/// invalidation rule: `retain` drops every entry whose key left the active
/// selection, so the cache never outgrows the current working set.
#[derive(Debug, Default)]
pub struct SeriesCache {
    entries: RwLock<HashMap<SeriesKey, Arc<Vec<Observation>>>>,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &SeriesKey) -> Option<Arc<Vec<Observation>>> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn insert(&self, key: SeriesKey, series: Arc<Vec<Observation>>) {
        self.entries.write().await.insert(key, series);
    }

    /// Drop every entry not present in `active`.
    pub async fn retain(&self, active: &HashSet<SeriesKey>) {
        self.entries
            .write()
            .await
            .retain(|key, _| active.contains(key));
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hydro_core::{Granularity, Parameter};

    fn key(ts_id: i64) -> SeriesKey {
        TimeseriesQuery {
            ts_id,
            parameter: Parameter::Discharge,
            granularity: Granularity::Daily,
            date_start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            date_end: NaiveDate::from_ymd_opt(2000, 12, 31).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = SeriesCache::new();
        assert!(cache.get(&key(1)).await.is_none());

        cache.insert(key(1), Arc::new(Vec::new())).await;

        assert!(cache.get(&key(1)).await.is_some());
        assert!(cache.get(&key(2)).await.is_none());
    }

    #[tokio::test]
    async fn test_retain_drops_inactive_keys() {
        let cache = SeriesCache::new();
        cache.insert(key(1), Arc::new(Vec::new())).await;
        cache.insert(key(2), Arc::new(Vec::new())).await;
        cache.insert(key(3), Arc::new(Vec::new())).await;

        let active: HashSet<SeriesKey> = [key(1), key(3)].into_iter().collect();
        cache.retain(&active).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get(&key(2)).await.is_none());
        assert!(cache.get(&key(3)).await.is_some());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = SeriesCache::new();
        cache.insert(key(1), Arc::new(Vec::new())).await;

        cache.clear().await;

        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_granularity_is_part_of_the_key() {
        let cache = SeriesCache::new();
        cache.insert(key(1), Arc::new(Vec::new())).await;

        let monthly = SeriesKey {
            granularity: Granularity::Monthly,
            ..key(1)
        };
        assert!(cache.get(&monthly).await.is_none());
    }
}
