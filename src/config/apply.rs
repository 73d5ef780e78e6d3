use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{Command, FrameStatArgs, PositiveU64};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments that were not set on the
/// command line.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut FrameStatArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "metrics")
        && let Some(metrics) = config.metrics.as_ref()
    {
        if metrics.iter().all(|metric| metric.trim().is_empty()) {
            return Err(AppError::config(ConfigError::EmptyMetrics));
        }
        args.metrics.clone_from(metrics);
    }

    if !is_cli(matches, "format")
        && let Some(format) = config.format
    {
        args.format = format;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.as_ref()
    {
        args.output = Some(output.clone());
    }

    if let (Command::Replay(replay), Some(replay_config)) =
        (&mut args.command, config.replay.as_ref())
    {
        if !is_cli(matches, "trigger_every")
            && let Some(trigger_every) = replay_config.trigger_every
        {
            replay.trigger_every = ensure_positive_u64(trigger_every, "replay.trigger_every")?;
        }
        if !is_cli(matches, "report_every_ms")
            && let Some(report_every_ms) = replay_config.report_every_ms
        {
            replay.report_every_ms = Some(ensure_positive_u64(
                report_every_ms,
                "replay.report_every_ms",
            )?);
        }
    }

    Ok(())
}

/// Checks the root matches and the active subcommand, since global flags may
/// be given on either side of the subcommand name.
fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    let from_cli = |matches: &ArgMatches| {
        matches
            .try_get_raw(name)
            .is_ok_and(|raw| raw.is_some())
            && matches.value_source(name) == Some(ValueSource::CommandLine)
    };
    from_cli(matches) || matches.subcommand().is_some_and(|(_, sub)| from_cli(sub))
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
