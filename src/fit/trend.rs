//! Trend estimation for a single series.
//!
//! Given a validated `Series` we:
//! - fit the OLS line (with the degenerate-time-axis policy)
//! - compute R² (with the constant-value policy)
//! - evaluate the line at `min(t)` and `max(t)` only
//!
//! The result is a pure function of the input order and values.

use crate::domain::{Series, TrendResult};
use crate::math::{fit_line, r_squared};

/// Fit a linear trend to `series`.
pub fn estimate_trend(series: &Series) -> TrendResult {
    let (t, v) = (series.times(), series.values());
    let line = fit_line(t, v);
    let r2 = r_squared(t, v, &line);

    let (t_min, t_max) = series.time_range();
    TrendResult {
        slope: line.slope,
        intercept: line.intercept,
        r_squared: r2,
        trend_x: [t_min, t_max],
        trend_y: [line.at(t_min), line.at(t_max)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn series(t: &[f64], v: &[f64]) -> Series {
        Series::new(t.to_vec(), v.to_vec()).unwrap()
    }

    #[test]
    fn three_year_example() {
        let trend = estimate_trend(&series(&[2000.0, 2001.0, 2002.0], &[10.0, 20.0, 30.0]));
        assert!((trend.slope - 10.0).abs() < TOL);
        assert!((trend.intercept + 19990.0).abs() < 1e-6);
        assert_eq!(trend.trend_x, [2000.0, 2002.0]);
        assert!((trend.trend_y[0] - 10.0).abs() < 1e-6);
        assert!((trend.trend_y[1] - 30.0).abs() < 1e-6);
        assert!((trend.r_squared - 1.0).abs() < TOL);
    }

    #[test]
    fn two_points_are_interpolated_exactly() {
        let trend = estimate_trend(&series(&[1994.0, 2024.0], &[650.0, 480.0]));
        assert!((trend.predict(1994.0) - 650.0).abs() < 1e-6);
        assert!((trend.predict(2024.0) - 480.0).abs() < 1e-6);
        assert!((trend.r_squared - 1.0).abs() < TOL);
    }

    #[test]
    fn two_equal_values_are_a_trivial_fit() {
        let trend = estimate_trend(&series(&[2000.0, 2001.0], &[5.0, 5.0]));
        assert_eq!(trend.r_squared, 1.0);
        assert!(trend.slope.abs() < TOL);
        assert!((trend.trend_y[0] - 5.0).abs() < 1e-6);
    }

    #[test]
    fn identical_years_use_mean_without_error() {
        let trend = estimate_trend(&series(&[2005.0, 2005.0, 2005.0], &[1.0, 2.0, 3.0]));
        assert_eq!(trend.slope, 0.0);
        assert!((trend.intercept - 2.0).abs() < TOL);
        assert_eq!(trend.trend_x, [2005.0, 2005.0]);
        assert!((trend.trend_y[0] - 2.0).abs() < TOL);
        assert!(trend.r_squared.is_finite());
    }

    #[test]
    fn unsorted_input_spans_min_to_max() {
        let trend = estimate_trend(&series(&[2002.0, 2000.0, 2001.0], &[30.0, 10.0, 20.0]));
        assert_eq!(trend.trend_x, [2000.0, 2002.0]);
        assert!((trend.slope - 10.0).abs() < TOL);
        assert!((trend.trend_y[1] - 30.0).abs() < 1e-6);
    }

    #[test]
    fn decreasing_noisy_series() {
        let t: Vec<f64> = (0..10).map(|i| 1994.0 + i as f64).collect();
        let v: Vec<f64> = t
            .iter()
            .enumerate()
            .map(|(i, &x)| 800.0 - 5.0 * (x - 1994.0) + if i % 2 == 0 { 3.0 } else { -3.0 })
            .collect();
        let trend = estimate_trend(&series(&t, &v));
        assert!(trend.slope < 0.0);
        assert!(trend.r_squared > 0.9 && trend.r_squared < 1.0);
    }
}
