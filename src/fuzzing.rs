//! Entry points for the fuzz targets under `fuzz/`.
use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::FrameStatArgs;
use crate::args::parsers::normalize_metric_list;
use crate::config::apply_config;
use crate::config::types::ConfigFile;
use crate::error::{AppError, AppResult};
use crate::metrics::{ExecutionMode, FpsMetrics, MetricReading};

thread_local! {
    static BASE_MATCHES: ArgMatches = FrameStatArgs::command()
        .get_matches_from(["framestat", "replay", "--log", "frames.csv"]);
}

/// Applies a parsed config on top of a minimal `replay` command line.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config_input(config: &ConfigFile) -> AppResult<FrameStatArgs> {
    BASE_MATCHES.with(|matches| {
        let mut args = FrameStatArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config)?;
        Ok(args)
    })
}

/// Normalizes a metric list the way the CLI does.
///
/// # Errors
///
/// Returns an error when no metric is left after trimming.
pub fn normalize_metrics_input(entries: &[String]) -> AppResult<Vec<String>> {
    normalize_metric_list(entries).map_err(AppError::from)
}

/// Runs samples through an inline engine, triggering every `trigger_every`
/// samples and once at the end, and returns the published metrics.
#[must_use]
pub fn inline_engine_readings(
    keys: &[String],
    samples: &[(u64, f64)],
    trigger_every: usize,
) -> Vec<MetricReading> {
    let engine = FpsMetrics::new(keys, ExecutionMode::Inline);
    let every = trigger_every.max(1);
    for (index, (timestamp_ns, value)) in samples.iter().enumerate() {
        engine.update(*timestamp_ns, *value);
        if index.saturating_add(1) % every == 0 {
            engine.trigger();
        }
    }
    engine.trigger();
    engine.read()
}
