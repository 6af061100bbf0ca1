//! Resource fetch for CSV sources.
//!
//! A locator is either an `http(s)://` URL or a filesystem path. Relative
//! paths are resolved against `FetchConfig::data_dir`. Every failure is
//! reported as `SeriesError::Load` so the caller can treat it per series.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::FetchConfig;
use crate::error::SeriesError;

/// Where a locator points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Url(String),
    Path(PathBuf),
}

impl Locator {
    pub fn parse(raw: &str, data_dir: &Path) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Locator::Url(trimmed.to_string());
        }
        let path = PathBuf::from(trimmed);
        if path.is_absolute() {
            Locator::Path(path)
        } else {
            Locator::Path(data_dir.join(path))
        }
    }
}

/// Fetch the full text of `locator`.
pub fn fetch_text(locator: &str, config: &FetchConfig) -> Result<String, SeriesError> {
    match Locator::parse(locator, &config.data_dir) {
        Locator::Url(url) => fetch_url(&url, config.timeout),
        Locator::Path(path) => read_file(locator, &path),
    }
}

fn fetch_url(url: &str, timeout: Option<Duration>) -> Result<String, SeriesError> {
    let load_err = |reason: String| SeriesError::Load {
        locator: url.to_string(),
        reason,
    };

    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| load_err(format!("failed to build HTTP client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .map_err(|e| load_err(format!("request failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(load_err(format!("request failed with status {}", resp.status())));
    }

    resp.text()
        .map_err(|e| load_err(format!("failed to read response body: {e}")))
}

fn read_file(locator: &str, path: &Path) -> Result<String, SeriesError> {
    let bytes = std::fs::read(path).map_err(|e| SeriesError::Load {
        locator: locator.to_string(),
        reason: format!("cannot read '{}': {e}", path.display()),
    })?;

    // Spreadsheet exports are occasionally latin-1; map bytes 1:1 rather than
    // rejecting the file.
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("climate-trends-fetch-{}-{name}", std::process::id()))
    }

    #[test]
    fn locator_detects_urls_case_insensitively() {
        let dir = Path::new("/data");
        assert_eq!(
            Locator::parse("HTTPS://example.org/a.csv", dir),
            Locator::Url("HTTPS://example.org/a.csv".to_string())
        );
        assert_eq!(
            Locator::parse("prcptot.csv", dir),
            Locator::Path(PathBuf::from("/data/prcptot.csv"))
        );
    }

    #[test]
    fn absolute_paths_ignore_data_dir() {
        let abs = temp_path("abs.csv");
        assert_eq!(
            Locator::parse(abs.to_str().unwrap(), Path::new("/elsewhere")),
            Locator::Path(abs)
        );
    }

    #[test]
    fn reads_local_file() {
        let path = temp_path("ok.csv");
        std::fs::write(&path, "Year,Val\n2000,1\n").unwrap();
        let text = fetch_text(path.to_str().unwrap(), &FetchConfig::default()).unwrap();
        assert_eq!(text, "Year,Val\n2000,1\n");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn latin1_bytes_are_mapped() {
        let path = temp_path("latin1.csv");
        std::fs::write(&path, b"Anno,Intensit\xe0\n2000,1\n").unwrap();
        let text = fetch_text(path.to_str().unwrap(), &FetchConfig::default()).unwrap();
        assert!(text.starts_with("Anno,Intensità"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = fetch_text("definitely/not/here.csv", &FetchConfig::default()).unwrap_err();
        match err {
            SeriesError::Load { locator, .. } => assert_eq!(locator, "definitely/not/here.csv"),
            other => panic!("expected load error, got {other:?}"),
        }
    }
}
