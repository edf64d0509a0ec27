//! KPI summaries over observation series

use crate::types::{Observation, Summary};

/// Min/max/mean over the non-gap values of a series.
///
/// Returns `None` when no finite value exists, so the caller renders an
/// empty state instead of a fabricated zero.
pub fn summarize(observations: &[Observation]) -> Option<Summary> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;

    for value in observations.iter().filter_map(Observation::finite_value) {
        min = min.min(value);
        max = max.max(value);
        sum += value;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    Some(Summary {
        min,
        max,
        mean: sum / count as f64,
        count,
    })
}
