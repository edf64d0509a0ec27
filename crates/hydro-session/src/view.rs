//! Fetch-then-derive cycle with stale-result discard

use crate::{RequestGuard, SeriesCache, SeriesKey, SessionResult};
use hydro_api::{DataProvider, TimeseriesQuery};
use hydro_core::{
    aggregate, characteristic_flows, compute_fdc, summarize, AggregatedPoint,
    CharacteristicFlows, FdcPoint, Observation, Summary,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Everything the presentation layer needs for one loaded series.
#[derive(Debug, Clone)]
pub struct SeriesLoad {
    /// Normalized raw series, gaps included, as fetched.
    pub raw: Arc<Vec<Observation>>,
    /// Period-bucketed mean series at the requested granularity.
    pub points: Vec<AggregatedPoint>,
    /// Flow-duration curve over the raw series.
    pub fdc: Vec<FdcPoint>,
    /// Q5/Q50/Q95 readout off the curve.
    pub flows: CharacteristicFlows,
    /// Min/max/mean cards; `None` when the range holds no data.
    pub kpis: Option<Summary>,
}

/// Coordinates fetching, caching, and derivation for one view.
///
/// `load` may be called again before a previous call resolves; whichever
/// call began last wins, and every earlier call returns `Ok(None)` instead
/// of its (now stale) result. Results for different keys are still cached,
/// so switching back is cheap.
pub struct SeriesView {
    provider: Arc<dyn DataProvider>,
    cache: SeriesCache,
    guard: RequestGuard,
}

impl SeriesView {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self {
            provider,
            cache: SeriesCache::new(),
            guard: RequestGuard::new(),
        }
    }

    /// Load a series and derive its aggregates.
    ///
    /// Returns `Ok(None)` when a newer `load` superseded this one while the
    /// fetch was in flight. The fetched data is still cached under its key.
    #[instrument(skip(self), fields(ts_id = query.ts_id))]
    pub async fn load(&self, query: &TimeseriesQuery) -> SessionResult<Option<SeriesLoad>> {
        let token = self.guard.begin();

        let raw = match self.cache.get(query).await {
            Some(series) => {
                debug!("cache hit");
                series
            }
            None => {
                let series = Arc::new(self.provider.timeseries(query).await?);
                self.cache.insert(query.clone(), Arc::clone(&series)).await;
                series
            }
        };

        if !self.guard.is_current(token) {
            debug!("superseded by a newer request, discarding result");
            return Ok(None);
        }

        let points = aggregate(&raw, query.granularity);
        let fdc = compute_fdc(&raw);
        let flows = characteristic_flows(&fdc);
        let kpis = summarize(&raw);

        Ok(Some(SeriesLoad {
            raw,
            points,
            fdc,
            flows,
            kpis,
        }))
    }

    /// Trim the cache to the given active selection.
    pub async fn retain(&self, active: &HashSet<SeriesKey>) {
        self.cache.retain(active).await;
    }

    /// Number of series currently memoized.
    pub async fn cached_series(&self) -> usize {
        self.cache.len().await
    }
}
