//! `climate-trends` library crate.
//!
//! The binary (`trends`) is a thin wrapper around this library so that:
//!
//! - loading and fitting are testable without spawning processes
//! - a page generator or notebook can call `load_series` / `estimate_trend`
//!   directly and feed its own charting layer

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod report;
