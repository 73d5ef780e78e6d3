use std::time::Duration;

use serde::Serialize;

/// Trailing window retained by the live engine.
pub const WINDOW_DURATION: Duration = Duration::from_secs(60);
/// [`WINDOW_DURATION`] in nanoseconds, the unit of sample timestamps.
pub const WINDOW_DURATION_NS: u64 = 60_000_000_000;
/// Readings at or below this value are startup/invalid frames and never stored.
pub const MIN_SAMPLE_VALUE: f64 = 0.0001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub timestamp_ns: u64,
    pub value: f32,
}

/// One published metric as seen by readers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReading {
    pub key: String,
    pub display_label: String,
    pub value: f32,
}

/// Immutable metric list swapped in after every completed cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricBoard {
    pub readings: Vec<MetricReading>,
    /// Completed computation cycles since construction.
    pub cycles: u64,
}

impl MetricBoard {
    #[must_use]
    pub fn reading(&self, key: &str) -> Option<&MetricReading> {
        self.readings.iter().find(|reading| reading.key == key)
    }
}
