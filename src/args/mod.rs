//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Command, FrameStatArgs, ReplayArgs, SummarizeArgs};
pub use defaults::default_metrics;
pub use types::{OutputFormat, PositiveU64};
