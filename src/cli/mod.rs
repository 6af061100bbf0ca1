//! Command-line parsing for the trend tool.
//!
//! Argument parsing and dispatch are kept apart from the loading/fitting
//! code, which stays usable as a plain library.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "trends", version, about = "Linear trends for climate-index CSV series")]
pub struct Cli {
    /// Enable debug logging (skipped rows, resolved columns).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load one CSV source, fit its trend, and print the result.
    Fit(FitArgs),
    /// Process every series listed in a manifest.
    ///
    /// A failing series is reported with a placeholder; the others are
    /// unaffected.
    Run(RunArgs),
}

/// Where and how to fetch sources.
#[derive(Debug, Args, Clone, Default)]
pub struct FetchArgs {
    /// Base directory for relative CSV paths (overrides `TRENDS_DATA_DIR`).
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// HTTP timeout in seconds (overrides `TRENDS_FETCH_TIMEOUT_SECS`).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// CSV path or http(s) URL.
    pub source: String,

    /// Chart title (defaults to the source).
    #[arg(long)]
    pub title: Option<String>,

    /// Unit of the value column, used in the annotation.
    #[arg(long)]
    pub unit: Option<String>,

    /// Print the chart payload as JSON instead of a text summary.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// JSON manifest: an array of `{id, source, title, unit, color?}`.
    #[arg(long, value_name = "JSON")]
    pub manifest: PathBuf,

    /// Write the chart document (style + per-series payloads) to this file.
    #[arg(long = "export-json", value_name = "PATH")]
    pub export_json: Option<PathBuf>,

    /// Write a one-row-per-series summary CSV.
    #[arg(long = "export-csv", value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Print the chart document to stdout instead of the text table.
    #[arg(long)]
    pub json: bool,

    /// Derive tick labels from the data instead of the fixed 1994-2024 range.
    #[arg(long)]
    pub auto_ticks: bool,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fit_with_overrides() {
        let cli = Cli::parse_from([
            "trends", "-v", "fit", "data/prcptot.csv", "--unit", "mm", "--timeout", "5",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Fit(args) => {
                assert_eq!(args.source, "data/prcptot.csv");
                assert_eq!(args.unit.as_deref(), Some("mm"));
                assert_eq!(args.fetch.timeout, Some(5));
                assert!(!args.json);
            }
            other => panic!("expected fit, got {other:?}"),
        }
    }

    #[test]
    fn parses_run_exports() {
        let cli = Cli::parse_from([
            "trends",
            "run",
            "--manifest",
            "series.json",
            "--export-json",
            "charts.json",
            "--export-csv",
            "summary.csv",
        ]);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.manifest, PathBuf::from("series.json"));
                assert_eq!(args.export_json, Some(PathBuf::from("charts.json")));
                assert_eq!(args.export_csv, Some(PathBuf::from("summary.csv")));
                assert!(args.fetch.data_dir.is_none());
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
