//! Error types.
//!
//! - `SeriesError`: everything that can go wrong while turning one CSV source
//!   into a fitted series. Always scoped to a single series.
//! - `AppError`: process-level failures at the CLI boundary (bad flags, bad
//!   manifest, unwritable export paths), carrying the exit code to use.

use std::fmt;

use thiserror::Error;

/// A structural problem found on a specific CSV line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    /// 1-based line number in the source file (the header is line 1).
    pub line: usize,
    pub message: String,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// The role a column plays in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Time,
    Value,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Time => f.write_str("time"),
            ColumnRole::Value => f.write_str("value"),
        }
    }
}

/// Per-series failure. None of these abort a multi-series run.
#[derive(Debug, Clone, Error)]
pub enum SeriesError {
    #[error("failed to load '{locator}': {reason}")]
    Load { locator: String, reason: String },

    #[error("CSV parse failed with {} row issue(s): {}", .issues.len(), join_issues(.issues))]
    Parse { issues: Vec<RowIssue> },

    #[error("no usable rows or columns in CSV")]
    EmptyData,

    #[error("could not identify the {role} column; available headers: {available:?}")]
    Schema {
        role: ColumnRole,
        available: Vec<String>,
    },

    #[error("insufficient data: need at least 2 numeric rows, got {usable}")]
    InsufficientData { usable: usize },

    #[error("time and value sequences differ in length ({times} vs {values})")]
    Misaligned { times: usize, values: usize },

    #[error("non-finite observation at index {index}")]
    NonFinite { index: usize },
}

impl SeriesError {
    /// Short stable label, used in exports and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            SeriesError::Load { .. } => "load",
            SeriesError::Parse { .. } => "parse",
            SeriesError::EmptyData => "empty",
            SeriesError::Schema { .. } => "schema",
            SeriesError::InsufficientData { .. } => "insufficient",
            SeriesError::Misaligned { .. } | SeriesError::NonFinite { .. } => "invalid",
        }
    }

    /// Exit code when this error ends a single-series CLI run.
    pub fn exit_code(&self) -> u8 {
        match self {
            SeriesError::Load { .. } => 4,
            _ => 3,
        }
    }
}

fn join_issues(issues: &[RowIssue]) -> String {
    issues
        .iter()
        .map(RowIssue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SeriesError> for AppError {
    fn from(err: SeriesError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
