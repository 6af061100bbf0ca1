//! Formatted terminal output and annotation text.
//!
//! Formatting lives here so the loader and estimator stay free of
//! presentation concerns, and so exports and terminal output agree on the
//! exact wording.

use crate::app::pipeline::{SeriesOutcome, SeriesReport};
use crate::domain::ChartStyle;
use crate::error::SeriesError;

/// On-chart annotation: `Trend: 10.000 mm/anno (R² = 1.000)`.
pub fn format_annotation(report: &SeriesReport, unit: &str, style: &ChartStyle) -> String {
    let per = if unit.is_empty() {
        style.period_label.clone()
    } else {
        format!("{unit}/{}", style.period_label)
    };
    format!(
        "Trend: {:.3} {per} (R² = {:.3})",
        report.trend.slope, report.trend.r_squared
    )
}

/// User-visible placeholder for a series that could not be charted.
pub fn placeholder_message(title: &str, err: &SeriesError) -> String {
    match err {
        SeriesError::Load { .. } => format!("Error loading data for {title}."),
        SeriesError::InsufficientData { .. } => {
            format!("Insufficient or inconsistent data for {title}.")
        }
        SeriesError::Schema { .. } => format!("Value column not found in CSV for {title}."),
        _ => format!("No valid data found for {title}."),
    }
}

/// Detailed summary of one processed series.
pub fn format_report(title: &str, unit: &str, report: &SeriesReport, style: &ChartStyle) -> String {
    let mut out = String::new();
    let loaded = &report.loaded;
    let trend = &report.trend;

    out.push_str(&format!("=== {title} ===\n"));
    out.push_str(&format!(
        "Columns: time=`{}` value=`{}`\n",
        loaded.columns.time, loaded.columns.value
    ));
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        loaded.rows_read,
        loaded.rows_used(),
        loaded.skipped.len()
    ));
    for issue in &loaded.skipped {
        out.push_str(&format!("  (skipped) {issue}\n"));
    }
    out.push_str(&format!(
        "Fit: slope={:.6} intercept={:.6} R²={:.6}\n",
        trend.slope, trend.intercept, trend.r_squared
    ));
    out.push_str(&format!(
        "Segment: ({}, {:.3}) -> ({}, {:.3})\n",
        fmt_time(trend.trend_x[0]),
        trend.trend_y[0],
        fmt_time(trend.trend_x[1]),
        trend.trend_y[1]
    ));
    out.push_str(&format_annotation(report, unit, style));
    out.push('\n');

    out
}

/// One line per series, in manifest order.
pub fn format_outcomes(outcomes: &[SeriesOutcome], style: &ChartStyle) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<24} {:>5} {:>12} {:>8} {:<}\n",
            "id", "n", "slope", "R²", "note"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<24} {:-<5} {:-<12} {:-<8} {:-<24}", "", "", "", "", "").trim_end());
    out.push('\n');

    for outcome in outcomes {
        let id = truncate(&outcome.spec.id, 24);
        let line = match &outcome.result {
            Ok(report) => format!(
                "{id:<24} {:>5} {:>12.3} {:>8.3} {}",
                report.loaded.rows_used(),
                report.trend.slope,
                report.trend.r_squared,
                format_annotation(report, &outcome.spec.unit, style),
            ),
            Err(err) => format!(
                "{id:<24} {:>5} {:>12} {:>8} {} [{}]",
                "-",
                "-",
                "-",
                placeholder_message(&outcome.spec.title, err),
                err.kind(),
            ),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    out.push_str(&format!(
        "\n{} series, {} charted, {} unavailable\n",
        outcomes.len(),
        outcomes.len() - failed,
        failed
    ));

    out
}

fn fmt_time(t: f64) -> String {
    if t.fract() == 0.0 && t.abs() < 1e9 {
        format!("{t:.0}")
    } else {
        format!("{t:.3}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
