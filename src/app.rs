//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and initialises logging
//! - resolves configuration (env + flags)
//! - runs the per-series pipeline
//! - prints reports and writes optional exports

use clap::Parser;
use tracing::info;

use crate::cli::{Command, FetchArgs, FitArgs, RunArgs};
use crate::config::{FetchConfig, load_manifest};
use crate::domain::{ChartStyle, SeriesSpec};
use crate::error::AppError;
use crate::io::export::{build_chart_document, chart_payload, write_chart_json, write_summary_csv};

pub mod pipeline;

use pipeline::SeriesOutcome;

/// Entry point for the `trends` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    crate::logging::init_logging(cli.verbose);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Run(args) => handle_run(args),
    }
}

fn fetch_config(args: &FetchArgs) -> Result<FetchConfig, AppError> {
    Ok(FetchConfig::from_env()?.with_overrides(args.data_dir.clone(), args.timeout))
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fetch_config(&args.fetch)?;
    let spec = SeriesSpec::adhoc(&args.source, args.title.clone(), args.unit.clone());
    let style = ChartStyle::default();

    let report = pipeline::process_series(&spec, &config)?;

    if args.json {
        let payload = chart_payload(&spec, &report, &style);
        let text = serde_json::to_string_pretty(&payload)
            .map_err(|e| AppError::new(2, format!("Failed to serialize chart payload: {e}")))?;
        println!("{text}");
    } else {
        print!(
            "{}",
            crate::report::format_report(&spec.title, &spec.unit, &report, &style)
        );
    }

    Ok(())
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = fetch_config(&args.fetch)?;
    let specs = load_manifest(&args.manifest)?;
    info!(series = specs.len(), manifest = %args.manifest.display(), "processing manifest");

    let outcomes = pipeline::run_all(&specs, &config);

    let mut style = ChartStyle::default();
    if args.auto_ticks {
        style = style.with_tick_years(tick_range(&outcomes));
    }
    let document = build_chart_document(&outcomes, &style);

    if args.json {
        let text = serde_json::to_string_pretty(&document)
            .map_err(|e| AppError::new(2, format!("Failed to serialize chart document: {e}")))?;
        println!("{text}");
    } else {
        print!("{}", crate::report::format_outcomes(&outcomes, &style));
    }

    if let Some(path) = &args.export_json {
        write_chart_json(path, &document)?;
    }
    if let Some(path) = &args.export_csv {
        write_summary_csv(path, &outcomes)?;
    }

    Ok(())
}

/// Whole-year span covering every charted series, if any succeeded.
pub fn tick_range(outcomes: &[SeriesOutcome]) -> Option<(i32, i32)> {
    let (lo, hi) = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .map(|r| r.loaded.series.time_range())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });

    if !(lo.is_finite() && hi.is_finite()) {
        return None;
    }
    Some((lo.floor() as i32, hi.ceil() as i32))
}
