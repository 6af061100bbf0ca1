//! Row-to-series conversion.
//!
//! Each record contributes a point only if both its time and value coerce to
//! finite numbers. Rows that do not are skipped and logged; they never fail
//! the series on their own.

use tracing::debug;

use crate::data::columns::{ResolvedColumns, resolve_columns};
use crate::domain::{Scalar, Series, Table};
use crate::error::{RowIssue, SeriesError};

/// A series plus what it took to build it.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub series: Series,
    pub columns: ResolvedColumns,
    pub rows_read: usize,
    /// Rows excluded by coercion, with the reason.
    pub skipped: Vec<RowIssue>,
}

impl LoadedSeries {
    pub fn rows_used(&self) -> usize {
        self.series.len()
    }
}

/// Resolve columns and extract the numeric series from a parsed table.
pub fn series_from_table(table: &Table) -> Result<LoadedSeries, SeriesError> {
    if table.headers.is_empty() || table.records.is_empty() {
        return Err(SeriesError::EmptyData);
    }

    let columns = resolve_columns(&table.headers)?;

    let mut t = Vec::with_capacity(table.records.len());
    let mut v = Vec::with_capacity(table.records.len());
    let mut skipped = Vec::new();

    for record in &table.records {
        let time = record.get(&columns.time).and_then(coerce_time);
        let value = record.get(&columns.value).and_then(coerce_value);

        match (time, value) {
            (Some(time), Some(value)) => {
                t.push(time);
                v.push(value);
            }
            (time, _) => {
                let message = if time.is_none() {
                    format!("non-numeric `{}`", columns.time)
                } else {
                    format!("non-numeric `{}`", columns.value)
                };
                debug!(line = record.line, reason = %message, "skipping row");
                skipped.push(RowIssue {
                    line: record.line,
                    message,
                });
            }
        }
    }

    if t.len() < 2 {
        return Err(SeriesError::InsufficientData { usable: t.len() });
    }

    Ok(LoadedSeries {
        series: Series::new(t, v)?,
        columns,
        rows_read: table.records.len(),
        skipped,
    })
}

/// Coerce a time cell: a number, a numeric string, or the leading four
/// digits of a date-like string (`2001-05-01` → 2001).
///
/// Day-first dates (`01/05/2001`) have no leading year and are rejected.
pub fn coerce_time(cell: &Scalar) -> Option<f64> {
    match cell {
        Scalar::Number(n) => finite(*n),
        Scalar::Text(s) => {
            let s = s.trim();
            parse_finite(s).or_else(|| leading_year(s))
        }
        Scalar::Null => None,
    }
}

/// Coerce a value cell: a number or a numeric string.
pub fn coerce_value(cell: &Scalar) -> Option<f64> {
    match cell {
        Scalar::Number(n) => finite(*n),
        Scalar::Text(s) => parse_finite(s.trim()),
        Scalar::Null => None,
    }
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().and_then(finite)
}

fn leading_year(s: &str) -> Option<f64> {
    let head = s.get(..4)?;
    if !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    head.parse::<u16>().ok().map(f64::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::parse_csv;

    #[test]
    fn end_to_end_three_rows() {
        let table = parse_csv("Year,Val\n2000,10\n2001,20\n2002,30\n").unwrap();
        let loaded = series_from_table(&table).unwrap();
        assert_eq!(loaded.series.times(), &[2000.0, 2001.0, 2002.0]);
        assert_eq!(loaded.series.values(), &[10.0, 20.0, 30.0]);
        assert_eq!(loaded.columns.time, "Year");
        assert_eq!(loaded.columns.value, "Val");
        assert!(loaded.skipped.is_empty());
    }

    #[test]
    fn non_numeric_values_are_skipped() {
        let table = parse_csv("Year,Val\n2000,10\n2001,\n2002,N/A\n2003,40\n").unwrap();
        let loaded = series_from_table(&table).unwrap();
        assert_eq!(loaded.series.times(), &[2000.0, 2003.0]);
        assert_eq!(loaded.series.values(), &[10.0, 40.0]);
        assert_eq!(loaded.rows_read, 4);
        assert_eq!(loaded.rows_used(), 2);
        let lines: Vec<usize> = loaded.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![3, 4]);
        assert_eq!(loaded.skipped[0].message, "non-numeric `Val`");
    }

    #[test]
    fn date_strings_fall_back_to_leading_year() {
        let table = parse_csv("Data,spi\n1994-01-01,0.5\n1995-01-01,-0.2\nabcd-01-01,0.1\n").unwrap();
        let loaded = series_from_table(&table).unwrap();
        assert_eq!(loaded.series.times(), &[1994.0, 1995.0]);
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].message, "non-numeric `Data`");
    }

    #[test]
    fn day_first_dates_are_skipped() {
        let table = parse_csv("Year,Val\n2000,1\n01/05/2001,2\n2002,3\n").unwrap();
        let loaded = series_from_table(&table).unwrap();
        assert_eq!(loaded.series.times(), &[2000.0, 2002.0]);
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].line, 3);
        assert_eq!(loaded.skipped[0].message, "non-numeric `Year`");
    }

    #[test]
    fn skipped_rows_after_blank_lines_keep_physical_lines() {
        let table = parse_csv("Year,Val\n2000,1\n\n\n2001,x\n2002,3\n").unwrap();
        let loaded = series_from_table(&table).unwrap();
        let lines: Vec<usize> = loaded.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![5]);
    }

    #[test]
    fn schema_error_returns_no_partial_series() {
        let table = parse_csv("ID,Notes\n1,a\n2,b\n").unwrap();
        let err = series_from_table(&table).unwrap_err();
        match err {
            SeriesError::Schema { available, .. } => {
                assert_eq!(available, vec!["ID".to_string(), "Notes".to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn fewer_than_two_usable_rows_is_insufficient() {
        let table = parse_csv("Year,Val\n2000,10\n2001,x\n").unwrap();
        assert!(matches!(
            series_from_table(&table),
            Err(SeriesError::InsufficientData { usable: 1 })
        ));
    }

    #[test]
    fn coercion_rules() {
        assert_eq!(coerce_time(&Scalar::Number(2001.0)), Some(2001.0));
        assert_eq!(coerce_time(&Scalar::Text(" 2001 ".to_string())), Some(2001.0));
        assert_eq!(coerce_time(&Scalar::Text("2001/05".to_string())), Some(2001.0));
        assert_eq!(coerce_time(&Scalar::Text("01/05/2001".to_string())), None);
        assert_eq!(coerce_time(&Scalar::Text("2001-05-01".to_string())), Some(2001.0));
        assert_eq!(coerce_time(&Scalar::Text("05/2001".to_string())), None);
        assert_eq!(coerce_time(&Scalar::Text("201".to_string())), Some(201.0));
        assert_eq!(coerce_time(&Scalar::Text("2a1".to_string())), None);
        assert_eq!(coerce_time(&Scalar::Null), None);
        assert_eq!(coerce_value(&Scalar::Text("12.5".to_string())), Some(12.5));
        assert_eq!(coerce_value(&Scalar::Text("NaN".to_string())), None);
        assert_eq!(coerce_value(&Scalar::Number(f64::INFINITY)), None);
        assert_eq!(coerce_value(&Scalar::Text("2001-05-01".to_string())), None);
    }
}
