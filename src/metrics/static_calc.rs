use super::compute;
use super::registry::MetricRegistry;
use super::types::{MetricBoard, MetricReading};

/// One-shot computation over an already collected session.
#[derive(Clone, Debug)]
pub struct StaticCalculator {
    registry: MetricRegistry,
    board: MetricBoard,
}

impl StaticCalculator {
    /// Computes every metric once, synchronously, over `values`.
    pub fn new<I, S>(identifiers: I, values: &[f32]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = MetricRegistry::parse(identifiers);
        compute::run_cycle(values, &mut registry);
        let board = registry.board(1);
        Self { registry, board }
    }

    #[must_use]
    pub fn read(&self) -> Vec<MetricReading> {
        self.board.readings.clone()
    }

    #[must_use]
    pub const fn board(&self) -> &MetricBoard {
        &self.board
    }

    #[must_use]
    pub const fn registry(&self) -> &MetricRegistry {
        &self.registry
    }
}
