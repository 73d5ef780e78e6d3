use crate::metrics::DEFAULT_METRICS;

#[must_use]
pub fn default_metrics() -> Vec<String> {
    DEFAULT_METRICS.iter().map(|key| (*key).to_owned()).collect()
}
