//! Column-role resolution.
//!
//! The headers of climate-index exports are not standardised, so the time and
//! value columns are picked by name with a deliberately simple rule set. The
//! first header in declared order that matches wins; there is no scoring.
//!
//! - time: lowercased name equals `year` / `anno`, or contains `year`, or
//!   contains `data`
//! - value: any other header whose lowercased name contains none of `date`,
//!   `month`, `id`

use crate::error::{ColumnRole, SeriesError};

/// Header names chosen for each role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub time: String,
    pub value: String,
}

const TIME_EXACT: [&str; 2] = ["year", "anno"];
const TIME_CONTAINS: [&str; 2] = ["year", "data"];
const VALUE_EXCLUDES: [&str; 3] = ["date", "month", "id"];

/// Pick the time and value columns from `headers` (declared order).
pub fn resolve_columns(headers: &[String]) -> Result<ResolvedColumns, SeriesError> {
    let schema_err = |role| SeriesError::Schema {
        role,
        available: headers.to_vec(),
    };

    let time_idx = headers
        .iter()
        .position(|h| is_time_header(h))
        .ok_or_else(|| schema_err(ColumnRole::Time))?;

    let value_idx = headers
        .iter()
        .enumerate()
        .position(|(idx, h)| idx != time_idx && is_value_header(h))
        .ok_or_else(|| schema_err(ColumnRole::Value))?;

    Ok(ResolvedColumns {
        time: headers[time_idx].clone(),
        value: headers[value_idx].clone(),
    })
}

fn is_time_header(name: &str) -> bool {
    let lower = name.to_lowercase();
    TIME_EXACT.contains(&lower.as_str()) || TIME_CONTAINS.iter().any(|k| lower.contains(k))
}

fn is_value_header(name: &str) -> bool {
    let lower = name.to_lowercase();
    !VALUE_EXCLUDES.iter().any(|k| lower.contains(k))
}
