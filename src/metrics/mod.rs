//! Sliding-window fps metrics: registry, window, computation, and the live
//! and static engines built on them.
mod compute;
mod controller;
mod engine;
mod registry;
mod static_calc;
mod types;
mod window;


pub use compute::{low_percentile, percentile_index, run_cycle, time_weighted_average};
pub use controller::{CycleStart, EngineState};
pub use engine::{ExecutionMode, FpsMetrics};
pub use registry::{AVERAGE_KEY, MetricKind, MetricRegistry, MetricSpec, percentile_label};
pub use static_calc::StaticCalculator;
pub use types::{
    MIN_SAMPLE_VALUE, MetricBoard, MetricReading, Sample, WINDOW_DURATION, WINDOW_DURATION_NS,
};
pub use window::SampleWindow;

/// Metrics shown when nothing is configured.
pub const DEFAULT_METRICS: [&str; 3] = [AVERAGE_KEY, "0.01", "0.001"];
