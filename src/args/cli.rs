use clap::{Args, Parser, Subcommand};

use super::defaults::default_metrics;
use super::parsers::parse_positive_u64;
use super::types::{OutputFormat, PositiveU64};

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Summarize a finished frame log in one pass
    Summarize(SummarizeArgs),
    /// Feed a frame log through the live sliding-window engine
    Replay(ReplayArgs),
}

#[derive(Debug, Args, Clone)]
pub struct SummarizeArgs {
    /// Frame log to read (timestamp_ns,fps[,frametime_ms] per line)
    #[arg(long, short = 'l')]
    pub log: String,
}

#[derive(Debug, Args, Clone)]
pub struct ReplayArgs {
    /// Frame log to read (timestamp_ns,fps[,frametime_ms] per line)
    #[arg(long, short = 'l')]
    pub log: String,

    /// Request a recompute every N frames
    #[arg(long = "trigger-every", default_value = "1", value_parser = parse_positive_u64)]
    pub trigger_every: PositiveU64,

    /// Print the published metrics every N milliseconds of log time
    #[arg(long = "report-every-ms", value_parser = parse_positive_u64)]
    pub report_every_ms: Option<PositiveU64>,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Real-time frame-rate metrics - time-weighted averages and percentile lows over a sliding 60s window, with frame-log summaries and replay."
)]
pub struct FrameStatArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Comma-separated metrics: AVG or low-percentile fractions (e.g. AVG,0.01,0.001)
    #[arg(
        long,
        short = 'm',
        global = true,
        value_delimiter = ',',
        default_values_t = default_metrics()
    )]
    pub metrics: Vec<String>,

    /// Path to config file (TOML or JSON)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Stdout format
    #[arg(long, global = true, default_value = "text", ignore_case = true)]
    pub format: OutputFormat,

    /// Also write a JSON report to this path
    #[arg(long, short = 'o', global = true)]
    pub output: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}
