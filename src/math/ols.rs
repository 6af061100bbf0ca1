//! Ordinary least squares for a single regressor.
//!
//! We only ever fit `v = a + b·t`, so the closed form is used directly:
//!
//! ```text
//! b = (n·Σtv − Σt·Σv) / (n·Σt² − (Σt)²)
//! a = (Σv − b·Σt) / n
//! ```
//!
//! Degenerate inputs are handled by policy rather than by dividing by zero:
//! - all `t` identical: `b = 0`, `a = mean(v)`
//! - all `v` identical: `R² = 1`
//! - a non-finite fit: `R² = 0`

/// Running sums needed by the closed-form fit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sums {
    pub n: usize,
    pub t: f64,
    pub v: f64,
    pub tv: f64,
    pub tt: f64,
}

impl Sums {
    pub fn from_pairs(t: &[f64], v: &[f64]) -> Self {
        t.iter().zip(v).fold(Sums::default(), |mut acc, (&x, &y)| {
            acc.n += 1;
            acc.t += x;
            acc.v += y;
            acc.tv += x * y;
            acc.tt += x * x;
            acc
        })
    }

    pub fn mean_v(&self) -> f64 {
        if self.n == 0 { 0.0 } else { self.v / self.n as f64 }
    }
}

/// Slope and intercept of a fitted line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    pub fn at(&self, t: f64) -> f64 {
        self.intercept + self.slope * t
    }
}

/// Fit `v = intercept + slope·t` by least squares.
///
/// `t` and `v` must be the same length; callers go through `Series`, which
/// guarantees it.
pub fn fit_line(t: &[f64], v: &[f64]) -> Line {
    let sums = Sums::from_pairs(t, v);
    let n = sums.n as f64;
    let denom = n * sums.tt - sums.t * sums.t;

    if time_axis_degenerate(t, denom, n * sums.tt) {
        return Line {
            slope: 0.0,
            intercept: sums.mean_v(),
        };
    }

    let slope = (n * sums.tv - sums.t * sums.v) / denom;
    let intercept = (sums.v - slope * sums.t) / n;
    Line { slope, intercept }
}

/// Coefficient of determination of `line` against `(t, v)`.
///
/// Returns `1.0` when `v` has no variance. Deviations are scaled by their
/// largest magnitude before squaring so large finite values do not overflow.
/// Anything that still ends up non-finite yields `0.0`.
pub fn r_squared(t: &[f64], v: &[f64], line: &Line) -> f64 {
    if v.is_empty() || all_equal(v) {
        return 1.0;
    }
    let n = v.len() as f64;
    let mean = v.iter().map(|y| y / n).sum::<f64>();
    let scale = v.iter().map(|y| (y - mean).abs()).fold(0.0, f64::max);
    if scale == 0.0 {
        return 1.0;
    }
    if !scale.is_finite() {
        return 0.0;
    }

    let ss_tot: f64 = v.iter().map(|y| ((y - mean) / scale).powi(2)).sum();
    let ss_res: f64 = t
        .iter()
        .zip(v)
        .map(|(&x, &y)| ((y - line.at(x)) / scale).powi(2))
        .sum();

    let r2 = 1.0 - ss_res / ss_tot;
    if r2.is_finite() { r2 } else { 0.0 }
}

// `n·Σt² − (Σt)²` is only exactly zero for identical `t` when the sums round
// cleanly, so identical values are checked directly as well.
fn time_axis_degenerate(t: &[f64], denom: f64, scale: f64) -> bool {
    denom == 0.0 || all_equal(t) || denom.abs() <= f64::EPSILON * scale.abs()
}

fn all_equal(xs: &[f64]) -> bool {
    match xs.first() {
        Some(first) => xs.iter().all(|x| x == first),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_exact_line() {
        // v = 2 + 3t on t = [0, 1, 2]
        let line = fit_line(&[0.0, 1.0, 2.0], &[2.0, 5.0, 8.0]);
        assert!((line.slope - 3.0).abs() < 1e-10);
        assert!((line.intercept - 2.0).abs() < 1e-10);
        assert!((r_squared(&[0.0, 1.0, 2.0], &[2.0, 5.0, 8.0], &line) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn identical_times_fall_back_to_mean() {
        let line = fit_line(&[2010.0, 2010.0, 2010.0], &[1.0, 2.0, 6.0]);
        assert_eq!(line.slope, 0.0);
        assert!((line.intercept - 3.0).abs() < 1e-12);
    }

    #[test]
    fn identical_fractional_times_are_still_degenerate() {
        let line = fit_line(&[0.1, 0.1, 0.1], &[1.0, 2.0, 3.0]);
        assert_eq!(line.slope, 0.0);
        assert!((line.intercept - 2.0).abs() < 1e-12);
    }

    #[test]
    fn constant_values_have_unit_r_squared() {
        let t = [0.0, 1.0, 2.0, 3.0];
        let v = [0.1, 0.1, 0.1, 0.1];
        let line = fit_line(&t, &v);
        assert_eq!(r_squared(&t, &v, &line), 1.0);
        assert!(line.slope.abs() < 1e-12);
    }

    #[test]
    fn huge_values_keep_a_finite_r_squared() {
        let t = [0.0, 1.0, 2.0];
        let v = [1e200, 2e200, 3e200];
        let line = fit_line(&t, &v);
        let r2 = r_squared(&t, &v, &line);
        assert!(r2.is_finite(), "got {r2}");
        assert!((r2 - 1.0).abs() < 1e-9, "got {r2}");
    }

    #[test]
    fn non_finite_fit_maps_to_zero() {
        let line = Line {
            slope: f64::NAN,
            intercept: 0.0,
        };
        assert_eq!(r_squared(&[0.0, 1.0], &[1.0, 2.0], &line), 0.0);
    }

    #[test]
    fn noisy_data_has_partial_fit() {
        let t = [1.0, 2.0, 3.0, 4.0, 5.0];
        let v = [2.0, 4.0, 5.0, 4.0, 5.0];
        let line = fit_line(&t, &v);
        // Textbook example: b = 0.6, a = 2.2, R² = 0.6
        assert!((line.slope - 0.6).abs() < 1e-10);
        assert!((line.intercept - 2.2).abs() < 1e-10);
        let r2 = r_squared(&t, &v, &line);
        assert!((r2 - 0.6).abs() < 1e-10, "got {r2}");
    }
}
