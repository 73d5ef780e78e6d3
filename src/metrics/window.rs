use std::collections::VecDeque;
use std::time::Duration;

use super::types::{MIN_SAMPLE_VALUE, Sample, WINDOW_DURATION};

/// Time-pruned sample buffer, ordered by timestamp.
#[derive(Clone, Debug)]
pub struct SampleWindow {
    samples: VecDeque<Sample>,
    span_ns: u64,
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::with_span(WINDOW_DURATION)
    }
}

impl SampleWindow {
    #[must_use]
    pub fn with_span(span: Duration) -> Self {
        Self {
            samples: VecDeque::new(),
            span_ns: u64::try_from(span.as_nanos()).unwrap_or(u64::MAX),
        }
    }

    /// Appends one reading and drops everything at or before `timestamp_ns - span`.
    ///
    /// Returns `false` when the reading was discarded as invalid.
    pub fn append(&mut self, timestamp_ns: u64, value: f64) -> bool {
        let stored = value > MIN_SAMPLE_VALUE;
        if stored {
            self.samples.push_back(Sample {
                timestamp_ns,
                value: value as f32,
            });
        }
        self.prune(timestamp_ns);
        stored
    }

    fn prune(&mut self, now_ns: u64) {
        let Some(cutoff) = now_ns.checked_sub(self.span_ns) else {
            return;
        };
        while self
            .samples
            .front()
            .is_some_and(|sample| sample.timestamp_ns <= cutoff)
        {
            self.samples.pop_front();
        }
    }

    /// Owned copy of the retained values, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<f32> {
        self.samples.iter().map(|sample| sample.value).collect()
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
