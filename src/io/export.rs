//! Exports for the charting collaborator and for spreadsheets.
//!
//! - chart document JSON: shared style + one entry per series (a payload to
//!   draw, or a placeholder to show instead)
//! - summary CSV: one row per series with the fit statistics

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::app::pipeline::{SeriesOutcome, SeriesReport};
use crate::domain::{ChartStyle, SeriesSpec};
use crate::error::AppError;
use crate::report::{format_annotation, placeholder_message};

/// `x`/`y` arrays as a renderer expects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Everything needed to draw one series and its trend segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub color: String,
    /// Raw points, in input order.
    pub raw: Trace,
    /// Two-point trend segment.
    pub trend: Trace,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub annotation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ChartEntry {
    Ready(ChartPayload),
    Unavailable {
        id: String,
        title: String,
        error_kind: String,
        message: String,
        detail: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartDocument<'a> {
    pub generated_at: String,
    pub style: &'a ChartStyle,
    /// Integer tick positions for the time axis; empty lets the renderer pick.
    pub tick_values: Vec<i32>,
    pub charts: Vec<ChartEntry>,
}

/// Build the payload for a successfully processed series.
pub fn chart_payload(spec: &SeriesSpec, report: &SeriesReport, style: &ChartStyle) -> ChartPayload {
    let series = &report.loaded.series;
    let trend = &report.trend;
    ChartPayload {
        id: spec.id.clone(),
        title: spec.title.clone(),
        unit: spec.unit.clone(),
        color: spec.color.clone(),
        raw: Trace {
            x: series.times().to_vec(),
            y: series.values().to_vec(),
        },
        trend: Trace {
            x: trend.trend_x.to_vec(),
            y: trend.trend_y.to_vec(),
        },
        slope: trend.slope,
        intercept: trend.intercept,
        r_squared: trend.r_squared,
        annotation: format_annotation(report, &spec.unit, style),
    }
}

pub fn chart_entry(outcome: &SeriesOutcome, style: &ChartStyle) -> ChartEntry {
    match &outcome.result {
        Ok(report) => ChartEntry::Ready(chart_payload(&outcome.spec, report, style)),
        Err(err) => ChartEntry::Unavailable {
            id: outcome.spec.id.clone(),
            title: outcome.spec.title.clone(),
            error_kind: err.kind().to_string(),
            message: placeholder_message(&outcome.spec.title, err),
            detail: err.to_string(),
        },
    }
}

/// Assemble the document for all outcomes, in manifest order.
pub fn build_chart_document<'a>(outcomes: &[SeriesOutcome], style: &'a ChartStyle) -> ChartDocument<'a> {
    ChartDocument {
        generated_at: chrono::Utc::now().to_rfc3339(),
        style,
        tick_values: style.tick_values(),
        charts: outcomes.iter().map(|o| chart_entry(o, style)).collect(),
    }
}

/// Write the chart document as pretty JSON.
pub fn write_chart_json(path: &Path, document: &ChartDocument<'_>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create chart JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, document)
        .map_err(|e| AppError::new(2, format!("Failed to write chart JSON: {e}")))?;

    Ok(())
}

/// Write one summary row per series.
pub fn write_summary_csv(path: &Path, outcomes: &[SeriesOutcome]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary CSV '{}': {e}", path.display())))?;

    writer
        .write_record([
            "id", "status", "n", "slope", "intercept", "r_squared", "t_min", "t_max", "error",
        ])
        .map_err(|e| AppError::new(2, format!("Failed to write summary CSV header: {e}")))?;

    for outcome in outcomes {
        let row: Vec<String> = match &outcome.result {
            Ok(report) => vec![
                outcome.spec.id.clone(),
                "ok".to_string(),
                report.loaded.rows_used().to_string(),
                format!("{:.10}", report.trend.slope),
                format!("{:.10}", report.trend.intercept),
                format!("{:.10}", report.trend.r_squared),
                report.trend.trend_x[0].to_string(),
                report.trend.trend_x[1].to_string(),
                String::new(),
            ],
            Err(err) => vec![
                outcome.spec.id.clone(),
                err.kind().to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                err.to_string(),
            ],
        };
        writer
            .write_record(&row)
            .map_err(|e| AppError::new(2, format!("Failed to write summary CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush summary CSV: {e}")))?;

    Ok(())
}
