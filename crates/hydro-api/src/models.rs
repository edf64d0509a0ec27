//! Wire models for the backend REST API

use chrono::NaiveDate;
use hydro_core::{Granularity, Parameter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A monitoring station as returned by `/hydro/stations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station_id: i64,
    pub station_code: String,
    pub station_name: String,
}

/// One row of the per-station series catalog (`/hydro/stats`): a scenario
/// with its time series id, native time step, and covered date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesInfo {
    pub station_id: i64,
    pub ts_id: i64,
    pub source_type: String,
    pub scenario_name: String,
    pub time_step: String,
    pub dt_min: Option<NaiveDate>,
    pub dt_max: Option<NaiveDate>,
}

/// A raw timeseries row before normalization.
///
/// The backend is loose about field names (`value` vs `flow` vs `debit`,
/// `datetime` vs `date`), so every field is captured as-is and resolved
/// against the alias table in `normalize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

/// Parameters of one timeseries fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeseriesQuery {
    pub ts_id: i64,
    pub parameter: Parameter,
    pub granularity: Granularity,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_info_decodes_catalog_row() {
        let json = r#"{
            "station_id": 1,
            "ts_id": 201,
            "source_type": "observed",
            "scenario_name": "Observations",
            "time_step": "daily",
            "dt_min": "2000-01-01",
            "dt_max": "2000-01-31"
        }"#;

        let info: SeriesInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.ts_id, 201);
        assert_eq!(info.dt_min, NaiveDate::from_ymd_opt(2000, 1, 1));
    }

    #[test]
    fn test_raw_record_captures_unknown_fields() {
        let json = r#"{"datetime": "2000-01-05", "debit": 42.5, "quality_flag": "ok"}"#;

        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.fields.len(), 3);
        assert!(record.fields.contains_key("debit"));
    }
}
