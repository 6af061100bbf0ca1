//! Reporting utilities: annotation text, placeholders, and terminal output.

pub mod format;

pub use format::*;
