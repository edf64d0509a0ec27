//! Caller-side fetch discipline for the dashboard
//!
//! The aggregation core is pure; what makes the dashboard correct under
//! rapid filter changes lives here: an explicit keyed series cache with a
//! retention rule, a monotonic request guard so only the latest request
//! ever reaches visible state, and `SeriesView` tying the two around the
//! fetch-then-derive cycle.

pub mod cache;
pub mod guard;
pub mod view;

pub use cache::*;
pub use guard::*;
pub use view::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] hydro_api::ApiError),
}

pub type SessionResult<T> = Result<T, SessionError>;
