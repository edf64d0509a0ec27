//! Monotonic request-token guard against stale results

use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one triggering event (a filter change, a station
/// switch). Only the result carrying the latest token may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Monotonic counter over triggering events.
///
/// Each `begin` supersedes every outstanding token; a fetch that resolves
/// after a newer `begin` must discard its result rather than race it into
/// visible state.
#[derive(Debug, Default)]
pub struct RequestGuard {
    latest: AtomicU64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding all earlier ones.
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` still belongs to the latest request.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}
