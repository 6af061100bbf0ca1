//! Shared per-series pipeline used by both CLI commands.
//!
//! load → extract → estimate, once per configured series. Series are
//! independent: each runs on the rayon pool, nothing is shared between them,
//! and a failure only affects its own slot.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::FetchConfig;
use crate::data::{LoadedSeries, load_series};
use crate::domain::{SeriesSpec, TrendResult};
use crate::error::SeriesError;
use crate::fit::estimate_trend;

/// A successfully processed series.
#[derive(Debug, Clone)]
pub struct SeriesReport {
    pub loaded: LoadedSeries,
    pub trend: TrendResult,
}

/// The result for one manifest entry, kept next to its spec.
#[derive(Debug, Clone)]
pub struct SeriesOutcome {
    pub spec: SeriesSpec,
    pub result: Result<SeriesReport, SeriesError>,
}

impl SeriesOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Load and fit a single series.
pub fn process_series(spec: &SeriesSpec, config: &FetchConfig) -> Result<SeriesReport, SeriesError> {
    debug!(id = %spec.id, source = %spec.source, "processing series");
    let loaded = load_series(&spec.source, config)?;
    let trend = estimate_trend(&loaded.series);

    info!(
        id = %spec.id,
        n = loaded.rows_used(),
        slope = trend.slope,
        r_squared = trend.r_squared,
        "trend fitted"
    );

    Ok(SeriesReport { loaded, trend })
}

/// Process every spec; outcomes come back in manifest order.
pub fn run_all(specs: &[SeriesSpec], config: &FetchConfig) -> Vec<SeriesOutcome> {
    specs
        .par_iter()
        .map(|spec| {
            let result = process_series(spec, config);
            if let Err(err) = &result {
                warn!(id = %spec.id, source = %spec.source, kind = err.kind(), "series failed: {err}");
            }
            SeriesOutcome {
                spec: spec.clone(),
                result,
            }
        })
        .collect()
}
