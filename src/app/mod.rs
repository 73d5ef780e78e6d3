//! Frame log commands: one-shot summaries and live-engine replays.
mod export;
pub mod logs;
mod replay;
mod summary;


pub use logs::{FrameRecord, parse_frame_line, read_frame_log};
pub use replay::{ReplayReport, ReplaySnapshot};
pub use summary::SessionReport;

pub(crate) use replay::run_replay;
pub(crate) use summary::run_summarize;
