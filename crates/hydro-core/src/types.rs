//! Core data types for basin monitoring series

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped scalar measurement as delivered by the backend.
///
/// `value` is `None` for sensor gaps. Gaps are excluded from every derived
/// computation but preserved here so raw tables can still show the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }

    /// The value, if present and finite. NaN and infinities count as gaps.
    pub fn finite_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

/// One point of a period-bucketed mean series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPoint {
    /// Start of the period this mean covers (first day of the month for
    /// monthly buckets, the observation instant for daily).
    pub period_start: DateTime<Utc>,

    /// Arithmetic mean of the non-gap observations in the period.
    pub value: f64,
}

/// One point of a flow-duration curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FdcPoint {
    /// Percentage of observations greater than or equal to `value`,
    /// per the Weibull plotting position. Always in (0, 100) exclusive.
    pub exceedance: f64,

    pub value: f64,
}

/// Time-bucket width for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// No bucketing; the series passes through as-is minus gaps.
    Daily,
    /// Calendar-month buckets labeled with the 1st of the month.
    Monthly,
}

impl Granularity {
    /// Wire name used by the backend `aggregation` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
        }
    }
}

/// Measured quantity. Drives field-alias selection at the ingestion
/// boundary; the core treats all parameters identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Discharge,
    Temperature,
    Precipitation,
    Nitrate,
    Phosphate,
}

/// Min/max/mean readout over a series, as shown on the dashboard KPI cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Number of non-gap observations the summary covers.
    pub count: usize,
}

/// Q5/Q50/Q95 characteristic flows read off a flow-duration curve.
///
/// Each field is the nearest-rank lookup at that exceedance; `None` when
/// the curve has no point at or past the target.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CharacteristicFlows {
    pub q5: Option<f64>,
    pub q50: Option<f64>,
    pub q95: Option<f64>,
}
