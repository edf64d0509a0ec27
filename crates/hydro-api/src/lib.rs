//! REST client and ingestion boundary for the basin monitoring backend
//!
//! This crate owns everything between the HTTP wire and the pure core:
//! the typed client for the backend's hydro endpoints, the tolerant wire
//! models, and the field-normalization step that turns duck-typed backend
//! rows into canonical `Observation`s. The core never sees a raw row.

pub mod client;
pub mod models;
pub mod normalize;

pub use client::*;
pub use models::*;
pub use normalize::*;

use hydro_core::Observation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status} for {endpoint}")]
    Status {
        status: reqwest::StatusCode,
        endpoint: String,
    },

    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Seam between the fetch layer and the session/view layer.
///
/// The session crate consumes this trait rather than `HydroClient`
/// directly, so tests can substitute an in-memory provider.
#[async_trait::async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetch the observation series for one query, already normalized.
    async fn timeseries(&self, query: &TimeseriesQuery) -> ApiResult<Vec<Observation>>;
}
