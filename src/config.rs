//! Runtime configuration.
//!
//! Sources, lowest to highest precedence:
//! - built-in defaults
//! - environment (a `.env` file is loaded first if present)
//! - CLI flags
//!
//! Recognised variables:
//! - `TRENDS_DATA_DIR`: base directory for relative CSV paths (default `.`)
//! - `TRENDS_FETCH_TIMEOUT_SECS`: HTTP timeout in seconds (default: none)

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::SeriesSpec;
use crate::error::AppError;

pub const DATA_DIR_VAR: &str = "TRENDS_DATA_DIR";
pub const TIMEOUT_VAR: &str = "TRENDS_FETCH_TIMEOUT_SECS";

/// How CSV resources are located and fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub data_dir: PathBuf,
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            timeout: None,
        }
    }
}

impl FetchConfig {
    /// Load from the process environment (after reading `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|s| !s.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir.trim());
        }

        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|s| !s.trim().is_empty()) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                AppError::new(2, format!("Invalid {TIMEOUT_VAR} '{raw}': {e}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Apply CLI overrides on top of the environment.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, timeout_secs: Option<u64>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(secs) = timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
        self
    }
}

/// Read a JSON manifest: an array of series specs.
pub fn load_manifest(path: &Path) -> Result<Vec<SeriesSpec>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open manifest '{}': {e}", path.display())))?;
    let specs: Vec<SeriesSpec> = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid manifest '{}': {e}", path.display())))?;

    if specs.is_empty() {
        return Err(AppError::new(2, format!("Manifest '{}' lists no series.", path.display())));
    }

    let mut seen = std::collections::HashSet::new();
    for spec in &specs {
        if !seen.insert(spec.id.as_str()) {
            return Err(AppError::new(2, format!("Duplicate series id in manifest: `{}`", spec.id)));
        }
    }

    Ok(specs)
}
