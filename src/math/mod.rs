//! Mathematical utilities: closed-form least squares and fit quality.

pub mod ols;

pub use ols::*;
