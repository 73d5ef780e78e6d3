use super::parsers::normalize_metric_list;
use super::*;
use crate::error::{AppError, AppResult, ValidationError};
use clap::Parser;

#[test]
fn parse_summarize_defaults() -> AppResult<()> {
    let args = FrameStatArgs::try_parse_from(["framestat", "summarize", "--log", "frames.csv"])?;
    match args.command {
        Command::Summarize(summary) => {
            if summary.log != "frames.csv" {
                return Err(AppError::validation("Unexpected log path"));
            }
        }
        Command::Replay(_) => return Err(AppError::validation("Expected summarize subcommand")),
    }
    if args.metrics != default_metrics() {
        return Err(AppError::validation(format!(
            "Unexpected default metrics: {:?}",
            args.metrics
        )));
    }
    if args.format != OutputFormat::Text || args.output.is_some() || args.verbose {
        return Err(AppError::validation("Unexpected global defaults"));
    }
    Ok(())
}

#[test]
fn parse_replay_options() -> AppResult<()> {
    let args = FrameStatArgs::try_parse_from([
        "framestat",
        "replay",
        "-l",
        "frames.csv",
        "--trigger-every",
        "4",
        "--report-every-ms",
        "1000",
        "--metrics",
        "avg,0.05",
        "--format",
        "JSON",
    ])?;
    let Command::Replay(replay) = args.command else {
        return Err(AppError::validation("Expected replay subcommand"));
    };
    if replay.trigger_every.get() != 4 {
        return Err(AppError::validation("Unexpected trigger interval"));
    }
    if replay.report_every_ms.map(PositiveU64::get) != Some(1000) {
        return Err(AppError::validation("Unexpected report interval"));
    }
    if args.metrics != ["avg", "0.05"] {
        return Err(AppError::validation(format!(
            "Unexpected metrics: {:?}",
            args.metrics
        )));
    }
    if args.format == OutputFormat::Json {
        Ok(())
    } else {
        Err(AppError::validation("Expected json format"))
    }
}

#[test]
fn replay_trigger_every_defaults_to_each_frame() -> AppResult<()> {
    let args = FrameStatArgs::try_parse_from(["framestat", "replay", "--log", "frames.csv"])?;
    match args.command {
        Command::Replay(replay) if replay.trigger_every.get() == 1 => Ok(()),
        Command::Replay(_) | Command::Summarize(_) => {
            Err(AppError::validation("Expected a trigger every frame"))
        }
    }
}

#[test]
fn zero_trigger_interval_is_rejected() -> AppResult<()> {
    let result = FrameStatArgs::try_parse_from([
        "framestat",
        "replay",
        "--log",
        "frames.csv",
        "--trigger-every",
        "0",
    ]);
    if result.is_err() {
        Ok(())
    } else {
        Err(AppError::validation("Expected --trigger-every 0 to fail"))
    }
}

#[test]
fn missing_subcommand_is_rejected() -> AppResult<()> {
    if FrameStatArgs::try_parse_from(["framestat", "--verbose"]).is_err() {
        Ok(())
    } else {
        Err(AppError::validation("Expected a subcommand to be required"))
    }
}

#[test]
fn positive_u64_parses_and_rejects_zero() -> AppResult<()> {
    let value: PositiveU64 = " 7 ".parse()?;
    if value.get() != 7 {
        return Err(AppError::validation("Unexpected positive value"));
    }
    match "0".parse::<PositiveU64>() {
        Err(ValidationError::ValueTooSmall { min: 1 }) => {}
        Err(_) | Ok(_) => return Err(AppError::validation("Expected ValueTooSmall")),
    }
    match "seven".parse::<PositiveU64>() {
        Err(ValidationError::InvalidNumber { .. }) => Ok(()),
        Err(_) | Ok(_) => Err(AppError::validation("Expected InvalidNumber")),
    }
}

#[test]
fn metric_list_is_trimmed_without_validation() -> AppResult<()> {
    let metrics = normalize_metric_list([" avg", "", "bogus ", "0.01"])?;
    if metrics != ["avg", "bogus", "0.01"] {
        return Err(AppError::validation(format!(
            "Unexpected metrics: {:?}",
            metrics
        )));
    }
    match normalize_metric_list(["", "  "]) {
        Err(ValidationError::EmptyMetricList) => Ok(()),
        Err(_) | Ok(_) => Err(AppError::validation("Expected EmptyMetricList")),
    }
}
