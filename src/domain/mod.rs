//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - parsed CSV data (`Scalar`, `Record`, `Table`)
//! - the validated numeric `Series` and its `TrendResult`
//! - run configuration (`SeriesSpec`) and the shared `ChartStyle`

pub mod style;
pub mod types;

pub use style::*;
pub use types::*;
