//! Trend fitting.
//!
//! Responsibilities:
//!
//! - fit an OLS line to a validated series
//! - report R² and the two-point trend segment

pub mod trend;

pub use trend::*;
