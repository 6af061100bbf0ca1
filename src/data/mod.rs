//! Series loading: fetch → parse → resolve columns → extract.

pub mod columns;
pub mod extract;

pub use columns::*;
pub use extract::*;

use tracing::info;

use crate::config::FetchConfig;
use crate::error::SeriesError;
use crate::io::{fetch_text, parse_csv};

/// Load one CSV resource and extract its `(time, value)` series.
pub fn load_series(locator: &str, config: &FetchConfig) -> Result<LoadedSeries, SeriesError> {
    let text = fetch_text(locator, config)?;
    let table = parse_csv(&text)?;
    let loaded = series_from_table(&table)?;

    info!(
        source = locator,
        time = %loaded.columns.time,
        value = %loaded.columns.value,
        rows_read = loaded.rows_read,
        rows_used = loaded.rows_used(),
        "series loaded"
    );

    Ok(loaded)
}
