use super::{apply_config, load_config, load_config_file, types::ConfigFile};
use clap::{CommandFactory, FromArgMatches};
use tempfile::tempdir;

use crate::args::{Command, FrameStatArgs, OutputFormat, PositiveU64};
use crate::error::{AppError, AppResult, ConfigError};

fn parse_with_config(argv: &[&str], config: &ConfigFile) -> AppResult<FrameStatArgs> {
    let matches = FrameStatArgs::command().try_get_matches_from(argv)?;
    let mut args = FrameStatArgs::from_arg_matches(&matches)?;
    apply_config(&mut args, &matches, config)?;
    Ok(args)
}

#[test]
fn parse_toml_config_with_replay_table() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("framestat.toml");
    let content = r#"
metrics = ["AVG", "0.05"]
format = "json"
output = "report.json"

[replay]
trigger_every = 10
report_every_ms = 1000
"#;
    std::fs::write(&path, content)?;

    let config = load_config_file(&path)?;
    if config.metrics.as_deref() != Some(&["AVG".to_owned(), "0.05".to_owned()][..]) {
        return Err(AppError::config("Unexpected metrics"));
    }
    if config.format != Some(OutputFormat::Json) {
        return Err(AppError::config("Unexpected format"));
    }
    if config.output.as_deref() != Some("report.json") {
        return Err(AppError::config("Unexpected output"));
    }
    let Some(replay) = config.replay else {
        return Err(AppError::config("Expected replay table"));
    };
    if replay.trigger_every != Some(10) || replay.report_every_ms != Some(1000) {
        return Err(AppError::config("Unexpected replay settings"));
    }
    Ok(())
}

#[test]
fn parse_json_config_accepts_fps_metrics_alias() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("framestat.json");
    std::fs::write(&path, r#"{ "fps_metrics": ["AVG", "0.001"] }"#)?;

    let config = load_config_file(&path)?;
    match config.metrics {
        Some(metrics) if metrics == ["AVG", "0.001"] => Ok(()),
        other => Err(AppError::config(format!("Unexpected metrics: {:?}", other))),
    }
}

#[test]
fn unknown_config_fields_are_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("framestat.toml");
    std::fs::write(&path, "window_seconds = 30\n")?;

    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::ParseToml { .. })) => Ok(()),
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::config("Expected unknown field to fail")),
    }
}

#[test]
fn unsupported_and_missing_extensions_are_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let yaml = dir.path().join("framestat.yaml");
    let bare = dir.path().join("framestat");
    std::fs::write(&yaml, "metrics: []\n")?;
    std::fs::write(&bare, "")?;

    match load_config_file(&yaml) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => {}
        Err(_) | Ok(_) => return Err(AppError::config("Expected UnsupportedExtension")),
    }
    match load_config_file(&bare) {
        Err(AppError::Config(ConfigError::MissingExtension)) => Ok(()),
        Err(_) | Ok(_) => Err(AppError::config("Expected MissingExtension")),
    }
}

#[test]
fn explicit_missing_config_is_a_read_error() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("absent.toml");
    let path = path.to_string_lossy().into_owned();

    match load_config(Some(&path)) {
        Err(AppError::Config(ConfigError::ReadConfig { .. })) => Ok(()),
        Err(_) | Ok(_) => Err(AppError::config("Expected ReadConfig")),
    }
}

#[test]
fn apply_config_fills_unset_values() -> AppResult<()> {
    let config: ConfigFile = toml::from_str(
        r#"
metrics = ["0.05"]
format = "json"

[replay]
trigger_every = 3
"#,
    )?;
    let args = parse_with_config(&["framestat", "replay", "--log", "frames.csv"], &config)?;

    if args.metrics != ["0.05"] || args.format != OutputFormat::Json {
        return Err(AppError::config("Config values were not applied"));
    }
    match args.command {
        Command::Replay(replay) if replay.trigger_every.get() == 3 => Ok(()),
        Command::Replay(_) | Command::Summarize(_) => {
            Err(AppError::config("Expected trigger_every from config"))
        }
    }
}

#[test]
fn apply_config_respects_cli_overrides() -> AppResult<()> {
    let config: ConfigFile = toml::from_str(
        r#"
metrics = ["0.05"]
output = "from-config.json"

[replay]
trigger_every = 3
report_every_ms = 500
"#,
    )?;
    let args = parse_with_config(
        &[
            "framestat",
            "replay",
            "--log",
            "frames.csv",
            "--metrics",
            "AVG",
            "--trigger-every",
            "8",
            "-o",
            "from-cli.json",
        ],
        &config,
    )?;

    if args.metrics != ["AVG"] {
        return Err(AppError::config(format!(
            "CLI metrics lost: {:?}",
            args.metrics
        )));
    }
    if args.output.as_deref() != Some("from-cli.json") {
        return Err(AppError::config("CLI output lost"));
    }
    let Command::Replay(replay) = args.command else {
        return Err(AppError::config("Expected replay subcommand"));
    };
    if replay.trigger_every.get() != 8 {
        return Err(AppError::config("CLI trigger interval lost"));
    }
    if replay.report_every_ms.map(PositiveU64::get) != Some(500) {
        return Err(AppError::config("Config report interval not applied"));
    }
    Ok(())
}

#[test]
fn apply_config_rejects_zero_intervals() -> AppResult<()> {
    let config: ConfigFile = toml::from_str("[replay]\nreport_every_ms = 0\n")?;
    match parse_with_config(&["framestat", "replay", "--log", "frames.csv"], &config) {
        Err(AppError::Config(ConfigError::FieldMustBePositive { field, .. }))
            if field == "replay.report_every_ms" =>
        {
            Ok(())
        }
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::config("Expected zero interval to fail")),
    }
}

#[test]
fn apply_config_rejects_blank_metric_list() -> AppResult<()> {
    let config: ConfigFile = toml::from_str("metrics = [\" \"]\n")?;
    match parse_with_config(&["framestat", "summarize", "--log", "frames.csv"], &config) {
        Err(AppError::Config(ConfigError::EmptyMetrics)) => Ok(()),
        Err(_) | Ok(_) => Err(AppError::config("Expected EmptyMetrics")),
    }
}
