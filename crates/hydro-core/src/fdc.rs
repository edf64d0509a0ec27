//! Flow-duration-curve derivation and quantile lookup

use crate::types::{CharacteristicFlows, FdcPoint, Observation};

/// Derive a flow-duration curve from an observation series.
///
/// Gaps and non-finite values are filtered out, the remaining values are
/// stable-sorted descending (largest discharge first, the hydrological
/// convention), and each rank i (1-indexed) gets the Weibull plotting
/// position `i / (n + 1) * 100`. Weibull keeps exceedance strictly inside
/// (0, 100), which matters for log-probability axes.
///
/// Equal values keep their relative input order and receive consecutive
/// distinct exceedances by rank position; no tied-rank averaging is done.
/// An empty or all-gap input yields an empty curve.
pub fn compute_fdc(observations: &[Observation]) -> Vec<FdcPoint> {
    let mut values: Vec<f64> = observations
        .iter()
        .filter_map(Observation::finite_value)
        .collect();

    // Stable sort; values are all finite so total_cmp matches numeric order.
    values.sort_by(|a, b| b.total_cmp(a));

    let n = values.len();
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| FdcPoint {
            exceedance: ((i + 1) as f64 / (n + 1) as f64) * 100.0,
            value,
        })
        .collect()
}

/// Nearest-rank quantile lookup on a derived curve.
///
/// Returns the value of the first point whose exceedance is at or past the
/// target, scanning in ascending-exceedance order. This is deliberately
/// non-interpolated; it reproduces the dashboard's readout rather than a
/// statistical quantile estimate. `None` means the target lies past every
/// available exceedance and the caller should display "no data", not zero.
pub fn find_quantile(fdc: &[FdcPoint], target_exceedance: f64) -> Option<f64> {
    fdc.iter()
        .find(|point| point.exceedance >= target_exceedance)
        .map(|point| point.value)
}

/// Q5/Q50/Q95 readout off a derived curve.
pub fn characteristic_flows(fdc: &[FdcPoint]) -> CharacteristicFlows {
    CharacteristicFlows {
        q5: find_quantile(fdc, 5.0),
        q50: find_quantile(fdc, 50.0),
        q95: find_quantile(fdc, 95.0),
    }
}
