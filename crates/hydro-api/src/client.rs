//! Typed client for the backend hydro endpoints

use crate::models::{RawRecord, SeriesInfo, Station, TimeseriesQuery};
use crate::normalize::normalize_records;
use crate::{ApiError, ApiResult, DataProvider};
use hydro_core::Observation;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP client for the `/api/v1/hydro` surface of the backend.
#[derive(Debug, Clone)]
pub struct HydroClient {
    http: reqwest::Client,
    base: Url,
}

impl HydroClient {
    /// Create a client for the given API base, e.g.
    /// `http://localhost:8000/api/v1`.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base = Url::parse(base_url.trim_end_matches('/'))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    /// List all hydro stations.
    pub async fn stations(&self) -> ApiResult<Vec<Station>> {
        self.get_json("hydro/stations", &[]).await
    }

    /// List the scenario/series catalog for one station.
    pub async fn series_catalog(&self, station_id: i64) -> ApiResult<Vec<SeriesInfo>> {
        let station_id = station_id.to_string();
        self.get_json("hydro/stats", &[("station_id", station_id.as_str())])
            .await
    }

    /// Fetch the water-quality measurement rows of one station as raw,
    /// un-normalized rows (`date` plus one column per chemistry parameter).
    pub async fn quality_records(&self, station_code: &str) -> ApiResult<Vec<RawRecord>> {
        self.get_json("quality/table", &[("station_code", station_code)])
            .await
    }

    /// Fetch one timeseries as raw, un-normalized rows.
    pub async fn raw_timeseries(&self, query: &TimeseriesQuery) -> ApiResult<Vec<RawRecord>> {
        let ts_id = query.ts_id.to_string();
        let date_start = query.date_start.to_string();
        let date_end = query.date_end.to_string();

        self.get_json(
            "hydro/timeseries",
            &[
                ("ts_id", ts_id.as_str()),
                ("aggregation", query.granularity.as_str()),
                ("date_start", date_start.as_str()),
                ("date_end", date_end.as_str()),
            ],
        )
        .await
    }

    /// Build the full request URL for an endpoint path and query pairs.
    fn endpoint_url(&self, path: &str, params: &[(&str, &str)]) -> ApiResult<Url> {
        // A base with an empty path serializes with a trailing slash;
        // trim it so the joined path never doubles the separator.
        let base = self.base.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> ApiResult<T> {
        let url = self.endpoint_url(path, params)?;
        debug!(%url, "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                endpoint: path.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }
}

#[async_trait::async_trait]
impl DataProvider for HydroClient {
    async fn timeseries(&self, query: &TimeseriesQuery) -> ApiResult<Vec<Observation>> {
        let rows = self.raw_timeseries(query).await?;
        debug!(ts_id = query.ts_id, rows = rows.len(), "timeseries fetched");
        Ok(normalize_records(&rows, query.parameter))
    }
}
