//! CSV ingest.
//!
//! Turns delimited text into a `Table` of loosely typed `Record`s:
//! - the first row is the header (BOM stripped, names trimmed, duplicates
//!   suffixed `_1`, `_2`, ...)
//! - empty lines are ignored
//! - each field is typed opportunistically (`Number` / `Text` / `Null`)
//!
//! Nothing here knows which columns matter; that is `data::columns`.

use std::collections::HashSet;

use csv::StringRecord;

use crate::domain::{Record, Scalar, Table};
use crate::error::{RowIssue, SeriesError};

/// Parse CSV text into a table.
///
/// Fails with `Parse` if any row is ragged or unreadable (every issue is
/// collected, not just the first), and with `EmptyData` if there are no
/// columns or no data rows.
pub fn parse_csv(text: &str) -> Result<Table, SeriesError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let raw_headers = reader
        .headers()
        .map_err(|e| SeriesError::Parse {
            issues: vec![RowIssue {
                line: 1,
                message: format!("unreadable header: {e}"),
            }],
        })?
        .clone();

    let headers = normalize_headers(&raw_headers);
    if headers.iter().all(|h| h.is_empty()) {
        return Err(SeriesError::EmptyData);
    }

    let mut records = Vec::new();
    let mut issues = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // Fallback when the reader has no position: header is line 1.
        let fallback_line = idx + 2;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| physical_line(text, p.byte()))
                    .unwrap_or(fallback_line);
                issues.push(RowIssue {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let line = record
            .position()
            .map(|p| physical_line(text, p.byte()))
            .unwrap_or(fallback_line);

        if record.len() != headers.len() {
            issues.push(RowIssue {
                line,
                message: format!("expected {} fields, found {}", headers.len(), record.len()),
            });
            continue;
        }

        let mut row = Record::new(line);
        for (name, raw) in headers.iter().zip(record.iter()) {
            row.insert(name.clone(), coerce_field(raw));
        }
        records.push(row);
    }

    if !issues.is_empty() {
        return Err(SeriesError::Parse { issues });
    }
    if records.is_empty() {
        return Err(SeriesError::EmptyData);
    }

    Ok(Table { headers, records })
}

/// Type a raw field: empty → `Null`, plain decimal → `Number`, else `Text`.
pub fn coerce_field(raw: &str) -> Scalar {
    if raw.is_empty() {
        return Scalar::Null;
    }
    let trimmed = raw.trim();
    if looks_numeric(trimmed) {
        if let Ok(v) = trimmed.parse::<f64>() {
            if v.is_finite() {
                return Scalar::Number(v);
            }
        }
    }
    Scalar::Text(raw.to_string())
}

// Accepts `-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?` only, so words such as
// `inf` or `NaN` stay text.
fn looks_numeric(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };

    let mut parts = mantissa.splitn(2, '.');
    let int = parts.next().unwrap_or("");
    let frac = parts.next();
    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());

    let mantissa_ok = all_digits(int)
        && frac.is_none_or(all_digits)
        && (!int.is_empty() || frac.is_some_and(|f| !f.is_empty()));

    let exponent_ok = exponent.is_none_or(|e| {
        let e = e.strip_prefix(['+', '-']).unwrap_or(e);
        !e.is_empty() && all_digits(e)
    });

    mantissa_ok && exponent_ok
}

// The reader's line counter does not advance over skipped blank lines, and a
// record's position is where reading resumed, before those blank lines. Step
// past the terminators, then count newlines to get the physical line.
fn physical_line(text: &str, byte: u64) -> usize {
    let bytes = text.as_bytes();
    let mut start = usize::try_from(byte).map_or(bytes.len(), |b| b.min(bytes.len()));
    while start < bytes.len() && matches!(bytes[start], b'\n' | b'\r') {
        start += 1;
    }
    bytes[..start].iter().filter(|&&b| b == b'\n').count() + 1
}

fn normalize_headers(headers: &StringRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .map(|name| {
            // Excel exports often prefix the first header with a UTF-8 BOM.
            let base = name.trim_start_matches('\u{feff}').trim().to_string();
            let mut candidate = base.clone();
            let mut counter = 1;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{base}_{counter}");
                counter += 1;
            }
            candidate
        })
        .collect()
}
