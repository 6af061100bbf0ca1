//! Shared domain types.
//!
//! These types are kept small so they can be:
//!
//! - produced by the CSV ingest without knowing which columns matter
//! - handed between loader, estimator and exporters by value
//! - serialized for the charting collaborator

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// A single CSV cell after opportunistic typing.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Null,
}

/// One data row keyed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Source line (1-based, header is line 1). Used for diagnostics only.
    pub line: usize,
    fields: HashMap<String, Scalar>,
}

impl Record {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            fields: HashMap::new(),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Scalar) {
        self.fields.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.fields.get(column)
    }
}

/// Parsed CSV: headers in declared order plus the records in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// Aligned `(t, v)` sequences.
///
/// Invariants: equal length, at least two points, every value finite.
/// Input order is preserved; nothing sorts by time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    t: Vec<f64>,
    v: Vec<f64>,
}

impl Series {
    pub fn new(t: Vec<f64>, v: Vec<f64>) -> Result<Self, SeriesError> {
        if t.len() != v.len() {
            return Err(SeriesError::Misaligned {
                times: t.len(),
                values: v.len(),
            });
        }
        if t.len() < 2 {
            return Err(SeriesError::InsufficientData { usable: t.len() });
        }
        if let Some(index) = t
            .iter()
            .zip(&v)
            .position(|(a, b)| !a.is_finite() || !b.is_finite())
        {
            return Err(SeriesError::NonFinite { index });
        }
        Ok(Self { t, v })
    }

    pub fn times(&self) -> &[f64] {
        &self.t
    }

    pub fn values(&self) -> &[f64] {
        &self.v
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Always false: a `Series` holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// `(min t, max t)`.
    pub fn time_range(&self) -> (f64, f64) {
        min_max(&self.t)
    }
}

fn min_max(xs: &[f64]) -> (f64, f64) {
    xs.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
        (lo.min(x), hi.max(x))
    })
}

/// OLS trend line plus fit quality.
///
/// `trend_x` is `[min t, max t]` and `trend_y` the line evaluated there: two
/// points are enough to draw the segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub trend_x: [f64; 2],
    pub trend_y: [f64; 2],
}

impl TrendResult {
    /// Evaluate the fitted line at `t`.
    pub fn predict(&self, t: f64) -> f64 {
        self.intercept + self.slope * t
    }
}

/// One configured series, as listed in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Output slot identifier (e.g. the DOM id of the chart container).
    pub id: String,
    /// Path or URL of the CSV resource.
    pub source: String,
    pub title: String,
    /// Unit of the value column, used in annotations and axis titles.
    pub unit: String,
    #[serde(default = "default_color")]
    pub color: String,
}

impl SeriesSpec {
    /// A spec for ad-hoc single-source runs.
    pub fn adhoc(source: impl Into<String>, title: Option<String>, unit: Option<String>) -> Self {
        let source = source.into();
        Self {
            id: "series".to_string(),
            title: title.unwrap_or_else(|| source.clone()),
            unit: unit.unwrap_or_default(),
            color: default_color(),
            source,
        }
    }
}

pub fn default_color() -> String {
    "#007bff".to_string()
}
