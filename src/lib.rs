//! Core library for the `framestat` CLI.
//!
//! The [`metrics`] module holds the frame-rate metrics engine: a 60 second
//! sliding window of instantaneous fps readings, a time-weighted average and
//! low-percentile metrics, computed either on a background worker
//! ([`metrics::FpsMetrics`]) or once over a finished session
//! ([`metrics::StaticCalculator`]). The remaining modules build the
//! `framestat` command on top of it: frame log parsing, summaries, replays,
//! and configuration.
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod logger;
pub mod metrics;

mod entry;

pub use entry::run;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
