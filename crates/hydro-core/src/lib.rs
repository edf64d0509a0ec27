//! Core data types and derived-series calculations for basin monitoring
//!
//! This crate provides the pure computation layer for the dashboard:
//! period aggregation, flow-duration-curve derivation, and KPI summaries
//! over in-memory observation series. Everything here is synchronous,
//! side-effect free, and total over its input domain.

pub mod aggregate;
pub mod fdc;
pub mod summary;
pub mod types;

pub use aggregate::*;
pub use fdc::*;
pub use summary::*;
pub use types::*;
