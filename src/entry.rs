use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::{run_replay, run_summarize};
use crate::args::parsers::normalize_metric_list;
use crate::args::{Command, FrameStatArgs};
use crate::error::AppResult;

/// Parses the command line and runs the selected command.
///
/// # Errors
///
/// Returns an error when arguments or config are invalid, the frame log
/// cannot be processed, or a report cannot be written.
pub fn run() -> AppResult<()> {
    let (args, matches) = parse_args()?;

    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, &matches))
}

fn parse_args() -> AppResult<(FrameStatArgs, ArgMatches)> {
    let matches = FrameStatArgs::command().get_matches();
    let args = FrameStatArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

async fn run_async(mut args: FrameStatArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(&mut args, matches, &config)?;
    }

    let metrics = normalize_metric_list(&args.metrics)?;
    tracing::debug!("Using fps metrics {:?}", metrics);

    let output = args.output.as_deref();
    match &args.command {
        Command::Summarize(summarize) => {
            run_summarize(summarize, &metrics, args.format, output).await
        }
        Command::Replay(replay) => run_replay(replay, &metrics, args.format, output).await,
    }
}
