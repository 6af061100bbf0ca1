//! Chart style handed to the rendering collaborator.
//!
//! One `ChartStyle` value is built per run and passed by reference to every
//! payload builder. Per-series differences (title, unit, color) live on
//! `SeriesSpec`, never here.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontStyle {
    pub family: String,
    pub size: u32,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisStyle {
    pub title_size: u32,
    pub grid_color: String,
    pub line_color: String,
    pub line_width: u32,
}

/// Styling for the dashed trend segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendLineStyle {
    pub color: String,
    pub width: u32,
    pub dash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStyle {
    pub font: FontStyle,
    pub title_size: u32,
    pub margins: Margins,
    /// Title of the time axis.
    pub time_axis_title: String,
    pub axis: AxisStyle,
    /// Inclusive year range for integer tick labels, if fixed.
    pub tick_years: Option<(i32, i32)>,
    pub tick_angle: i32,
    pub background: String,
    pub raw_line_width: u32,
    pub raw_marker_size: u32,
    pub trend_line: TrendLineStyle,
    /// Period used in slope annotations (`mm/anno`).
    pub period_label: String,
}

impl ChartStyle {
    /// Integer tick positions, when a fixed year range is configured.
    pub fn tick_values(&self) -> Vec<i32> {
        match self.tick_years {
            Some((lo, hi)) if lo <= hi => (lo..=hi).collect(),
            _ => Vec::new(),
        }
    }

    pub fn with_tick_years(mut self, range: Option<(i32, i32)>) -> Self {
        self.tick_years = range;
        self
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font: FontStyle {
                family: "Arial, sans-serif".to_string(),
                size: 12,
                color: "#333".to_string(),
            },
            title_size: 16,
            margins: Margins {
                top: 50,
                bottom: 60,
                left: 60,
                right: 20,
            },
            time_axis_title: "Anno".to_string(),
            axis: AxisStyle {
                title_size: 14,
                grid_color: "#e0e0e0".to_string(),
                line_color: "#ccc".to_string(),
                line_width: 1,
            },
            tick_years: Some((1994, 2024)),
            tick_angle: -45,
            background: "#fcfcfc".to_string(),
            raw_line_width: 2,
            raw_marker_size: 6,
            trend_line: TrendLineStyle {
                color: "#FF0000".to_string(),
                width: 3,
                dash: "dash".to_string(),
            },
            period_label: "anno".to_string(),
        }
    }
}
