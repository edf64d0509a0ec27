//! Period aggregation of observation series

use crate::types::{AggregatedPoint, Granularity, Observation};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use std::collections::BTreeMap;

/// Accumulator for the arithmetic mean of one period bucket
#[derive(Debug, Clone, Default)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn result(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum / self.count as f64)
    }
}

/// Bucket observations by period and compute the mean of each bucket.
///
/// - `Daily` is the identity transform: gaps are dropped, everything else
///   passes through in input order with its original timestamp.
/// - `Monthly` groups by calendar month and labels every bucket with the
///   1st of that month at midnight UTC, regardless of which days actually
///   carry data. A sparse month is indistinguishable from a full one in
///   the output; consumers that care must inspect the raw series.
///
/// Gaps (`None`) and non-finite values never contribute to a mean. A month
/// containing only gaps produces no output point at all. Monthly output is
/// ascending by `period_start`. The input is never mutated.
pub fn aggregate(observations: &[Observation], granularity: Granularity) -> Vec<AggregatedPoint> {
    match granularity {
        Granularity::Daily => observations
            .iter()
            .filter_map(|obs| {
                obs.finite_value().map(|value| AggregatedPoint {
                    period_start: obs.timestamp,
                    value,
                })
            })
            .collect(),
        Granularity::Monthly => {
            // BTreeMap keyed by (year, month) keeps buckets in calendar
            // order, so the output needs no separate sort.
            let mut buckets: BTreeMap<(i32, u32), MeanAccumulator> = BTreeMap::new();

            for obs in observations {
                if let Some(value) = obs.finite_value() {
                    let key = (obs.timestamp.year(), obs.timestamp.month());
                    buckets.entry(key).or_default().add(value);
                }
            }

            buckets
                .into_iter()
                .filter_map(|((year, month), acc)| {
                    acc.result().map(|value| AggregatedPoint {
                        period_start: month_start(year, month),
                        value,
                    })
                })
                .collect()
        }
    }
}

fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    // (year, month) came from a valid DateTime, so the 1st always exists.
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn obs(y: i32, m: u32, d: u32, value: Option<f64>) -> Observation {
        Observation::new(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(), value)
    }

    #[test]
    fn test_daily_is_identity_minus_gaps() {
        let input = vec![
            obs(2024, 1, 3, Some(12.0)),
            obs(2024, 1, 1, None),
            obs(2024, 1, 2, Some(8.0)),
        ];

        let out = aggregate(&input, Granularity::Daily);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].period_start, input[0].timestamp);
        assert_eq!(out[0].value, 12.0);
        assert_eq!(out[1].period_start, input[2].timestamp);
        assert_eq!(out[1].value, 8.0);
    }

    #[test]
    fn test_monthly_groups_and_orders() {
        // Deliberately unordered input across two months
        let input = vec![
            obs(2024, 2, 1, Some(5.0)),
            obs(2024, 1, 20, Some(20.0)),
            obs(2024, 1, 5, Some(10.0)),
        ];

        let out = aggregate(&input, Granularity::Monthly);

        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0].period_start,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(out[0].value, 15.0);
        assert_eq!(
            out[1].period_start,
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(out[1].value, 5.0);
    }

    #[test]
    fn test_monthly_mean_excludes_gaps() {
        let input = vec![obs(2024, 1, 1, Some(10.0)), obs(2024, 1, 15, None)];

        let out = aggregate(&input, Granularity::Monthly);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value, 10.0);
    }

    #[test]
    fn test_month_of_only_gaps_is_dropped() {
        let input = vec![
            obs(2024, 1, 1, None),
            obs(2024, 1, 2, Some(f64::NAN)),
            obs(2024, 2, 1, Some(7.0)),
        ];

        let out = aggregate(&input, Granularity::Monthly);

        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].period_start,
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert!(aggregate(&[], Granularity::Daily).is_empty());
        assert!(aggregate(&[], Granularity::Monthly).is_empty());
    }

    #[test]
    fn test_aggregate_is_pure() {
        let input = vec![
            obs(2024, 6, 1, Some(12.0)),
            obs(2024, 6, 15, Some(18.0)),
            obs(2024, 6, 30, None),
        ];
        let snapshot = input.clone();

        let first = aggregate(&input, Granularity::Monthly);
        let second = aggregate(&input, Granularity::Monthly);

        assert_eq!(first, second);
        assert_eq!(input, snapshot);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].value, 15.0);
        assert_eq!(
            first[0].period_start,
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_duplicate_timestamps_all_count() {
        let input = vec![obs(2024, 3, 10, Some(4.0)), obs(2024, 3, 10, Some(8.0))];

        let out = aggregate(&input, Granularity::Monthly);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value, 6.0);
    }
}
