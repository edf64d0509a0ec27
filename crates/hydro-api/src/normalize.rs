//! Field normalization at the ingestion boundary
//!
//! The backend's row shape varies by endpoint and parameter: the date field
//! may be `datetime`, `date`, or `dt`; the measurement may be `value`,
//! `flow`, `debit`, a chemistry column, and so on. All of that variation is
//! resolved here, against one alias table per field, so downstream code
//! only ever handles canonical `Observation`s.

use crate::models::RawRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use hydro_core::{Observation, Parameter};
use tracing::warn;

/// Accepted names for the timestamp field, in lookup order.
const TIMESTAMP_ALIASES: &[&str] = &["datetime", "date", "dt", "timestamp"];

/// Accepted names for the measurement field of each parameter, in lookup
/// order. `value` always comes first: it is what the timeseries endpoints
/// return; the rest cover the legacy per-parameter column names.
pub fn value_aliases(parameter: Parameter) -> &'static [&'static str] {
    match parameter {
        Parameter::Discharge => &["value", "flow", "debit", "q", "discharge_m3s"],
        Parameter::Temperature => &["value", "temperature", "temp"],
        Parameter::Precipitation => &["value", "precipitation", "precip", "rain"],
        Parameter::Nitrate => &["value", "nitrate", "no3", "n"],
        Parameter::Phosphate => &["value", "phosphate", "po4", "p"],
    }
}

/// Normalize raw backend rows into canonical observations.
///
/// Rows with an unparseable or missing timestamp are skipped entirely
/// (logged at warn). A missing, null, or non-numeric measurement keeps the
/// row as a gap (`value: None`) so raw displays still show it.
pub fn normalize_records(records: &[RawRecord], parameter: Parameter) -> Vec<Observation> {
    records
        .iter()
        .filter_map(|record| normalize_record(record, parameter))
        .collect()
}

fn normalize_record(record: &RawRecord, parameter: Parameter) -> Option<Observation> {
    let raw_ts = TIMESTAMP_ALIASES
        .iter()
        .find_map(|name| record.fields.get(*name));

    let Some(raw_ts) = raw_ts else {
        warn!(?record, "row has no timestamp field, skipping");
        return None;
    };

    let Some(timestamp) = parse_timestamp(raw_ts) else {
        warn!(raw = %raw_ts, "unparseable timestamp, skipping row");
        return None;
    };

    let value = value_aliases(parameter)
        .iter()
        .find_map(|name| record.fields.get(*name))
        .and_then(serde_json::Value::as_f64);

    Some(Observation::new(timestamp, value))
}

/// Parse the timestamp formats the backend emits: RFC 3339, naive
/// datetime, or bare date (taken as midnight UTC).
fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(json: &str) -> RawRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_canonical_row() {
        let rows = vec![record(r#"{"datetime": "2000-01-05", "value": 42.5}"#)];

        let out = normalize_records(&rows, Parameter::Discharge);

        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].timestamp,
            Utc.with_ymd_and_hms(2000, 1, 5, 0, 0, 0).unwrap()
        );
        assert_eq!(out[0].value, Some(42.5));
    }

    #[test]
    fn test_aliased_fields() {
        let rows = vec![
            record(r#"{"date": "2000-01-05", "debit": 10.0}"#),
            record(r#"{"dt": "2000-01-06", "q": 20.0}"#),
        ];

        let out = normalize_records(&rows, Parameter::Discharge);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].value, Some(10.0));
        assert_eq!(out[1].value, Some(20.0));
    }

    #[test]
    fn test_alias_table_is_per_parameter() {
        let rows = vec![record(r#"{"date": "2000-01-05", "n": 3.2, "p": 0.8}"#)];

        let nitrate = normalize_records(&rows, Parameter::Nitrate);
        let phosphate = normalize_records(&rows, Parameter::Phosphate);

        assert_eq!(nitrate[0].value, Some(3.2));
        assert_eq!(phosphate[0].value, Some(0.8));
    }

    #[test]
    fn test_missing_value_becomes_gap() {
        let rows = vec![
            record(r#"{"datetime": "2000-01-05"}"#),
            record(r#"{"datetime": "2000-01-06", "value": null}"#),
            record(r#"{"datetime": "2000-01-07", "value": "n/a"}"#),
        ];

        let out = normalize_records(&rows, Parameter::Discharge);

        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|o| o.value.is_none()));
    }

    #[test]
    fn test_malformed_timestamp_skips_row() {
        let rows = vec![
            record(r#"{"datetime": "not-a-date", "value": 1.0}"#),
            record(r#"{"value": 2.0}"#),
            record(r#"{"datetime": "2000-01-05", "value": 3.0}"#),
        ];

        let out = normalize_records(&rows, Parameter::Discharge);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value, Some(3.0));
    }

    #[test]
    fn test_timestamp_formats() {
        let rows = vec![
            record(r#"{"datetime": "2000-01-05T06:30:00Z", "value": 1.0}"#),
            record(r#"{"datetime": "2000-01-05T06:30:00", "value": 2.0}"#),
            record(r#"{"datetime": "2000-01-05 06:30:00", "value": 3.0}"#),
        ];

        let out = normalize_records(&rows, Parameter::Discharge);

        assert_eq!(out.len(), 3);
        for o in &out {
            assert_eq!(
                o.timestamp,
                Utc.with_ymd_and_hms(2000, 1, 5, 6, 30, 0).unwrap()
            );
        }
    }
}
