use std::sync::Arc;
use std::thread::JoinHandle;

use arcshift::ArcShift;
use parking_lot::Mutex;

use crate::error::MetricsError;

use super::compute;
use super::controller::{CycleStart, SyncController};
use super::registry::MetricRegistry;
use super::types::{MetricBoard, MetricReading};

const WORKER_THREAD_NAME: &str = "fps-metrics";

/// Where computation cycles run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// A dedicated worker thread, started with [`FpsMetrics::start`].
    #[default]
    Background,
    /// Cycles run on the caller's thread inside [`FpsMetrics::trigger`].
    Inline,
}

/// Computation state owned by whichever actor runs a cycle.
struct CycleState {
    registry: MetricRegistry,
    publisher: ArcShift<MetricBoard>,
    cycles: u64,
}

impl CycleState {
    fn run(&mut self, controller: &SyncController) {
        let snapshot = controller.window.lock().snapshot();
        compute::run_cycle(&snapshot, &mut self.registry);
        self.cycles = self.cycles.saturating_add(1);
        tracing::trace!(
            "fps metrics cycle {} over {} samples",
            self.cycles,
            snapshot.len()
        );
        self.publisher.update(self.registry.board(self.cycles));
    }
}

/// Live sliding-window fps metrics engine.
///
/// The producer calls [`update`](Self::update) and [`trigger`](Self::trigger)
/// from its frame loop; readers call [`read`](Self::read) from anywhere.
/// Published values always come from a complete cycle and may trail the
/// latest sample by one cycle.
pub struct FpsMetrics {
    controller: Arc<SyncController>,
    cycle: Arc<Mutex<CycleState>>,
    board: ArcShift<MetricBoard>,
    mode: ExecutionMode,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for FpsMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FpsMetrics")
            .field("mode", &self.mode)
            .field("board", &*self.board.shared_get())
            .finish_non_exhaustive()
    }
}

impl FpsMetrics {
    /// Builds an engine without starting any worker.
    pub fn new<I, S>(identifiers: I, mode: ExecutionMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let registry = MetricRegistry::parse(identifiers);
        let board = ArcShift::new(registry.board(0));
        let cycle = CycleState {
            registry,
            publisher: board.clone(),
            cycles: 0,
        };
        Self {
            controller: Arc::new(SyncController::default()),
            cycle: Arc::new(Mutex::new(cycle)),
            board,
            mode,
            worker: Mutex::new(None),
        }
    }

    /// Builds a background engine and starts its worker.
    ///
    /// # Errors
    ///
    /// Returns an error when the worker thread cannot be spawned.
    pub fn spawn<I, S>(identifiers: I) -> Result<Self, MetricsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let metrics = Self::new(identifiers, ExecutionMode::Background);
        metrics.start()?;
        Ok(metrics)
    }

    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Starts the background worker. Inline engines have nothing to start.
    ///
    /// # Errors
    ///
    /// Returns an error when the worker is already running, the engine has
    /// been shut down, or the thread cannot be spawned.
    pub fn start(&self) -> Result<(), MetricsError> {
        if self.mode == ExecutionMode::Inline {
            return Ok(());
        }
        let mut worker = self.worker.lock();
        if worker.is_some() {
            return Err(MetricsError::AlreadyStarted);
        }
        if !self.controller.attach() {
            return Err(MetricsError::Terminated);
        }

        let controller = Arc::clone(&self.controller);
        let cycle = Arc::clone(&self.cycle);
        let handle = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_owned())
            .spawn(move || worker_loop(&controller, &cycle))
            .map_err(|err| {
                self.controller.detach();
                MetricsError::WorkerSpawn { source: err }
            })?;
        *worker = Some(handle);
        tracing::debug!("fps metrics worker started");
        Ok(())
    }

    /// Feeds one instantaneous reading. Near-zero values are ignored.
    pub fn update(&self, timestamp_ns: u64, value: f64) {
        self.controller.append(timestamp_ns, value);
    }

    /// Requests a recompute. Never waits for it.
    pub fn trigger(&self) {
        if !self.controller.request() {
            return;
        }
        if self.mode == ExecutionMode::Inline {
            self.drain_inline();
        }
    }

    fn drain_inline(&self) {
        while let Some(CycleStart::Run) = self.controller.try_begin() {
            self.cycle.lock().run(&self.controller);
            self.controller.finish_cycle();
        }
    }

    /// Drops all retained samples once any in-flight cycle has finished.
    pub fn reset(&self) {
        self.controller.reset();
        tracing::debug!("fps metrics window cleared");
    }

    /// Current published metrics in definition order.
    #[must_use]
    pub fn read(&self) -> Vec<MetricReading> {
        self.board.shared_get().readings.clone()
    }

    #[must_use]
    pub fn board(&self) -> MetricBoard {
        self.board.shared_get().clone()
    }

    /// Completed computation cycles.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.board.shared_get().cycles
    }

    /// No cycle is running and no accepted request is waiting for one.
    ///
    /// Once this holds after a [`trigger`](Self::trigger), the published
    /// board reflects every sample appended before that trigger.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.controller.is_busy()
    }

    /// Number of samples currently retained.
    #[must_use]
    pub fn retained_samples(&self) -> usize {
        self.controller.window.lock().len()
    }

    /// Stops the worker and waits for it. Safe to call more than once.
    pub fn shutdown(&self) {
        self.controller.terminate();
        let handle = self.worker.lock().take();
        if let Some(handle) = handle
            && handle.join().is_err()
        {
            tracing::warn!("fps metrics worker panicked");
        }
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.controller.is_terminating()
    }
}

impl Drop for FpsMetrics {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Clears worker bookkeeping even when a cycle panics.
struct DetachOnExit<'controller>(&'controller SyncController);

impl Drop for DetachOnExit<'_> {
    fn drop(&mut self) {
        self.0.detach();
    }
}

fn worker_loop(controller: &SyncController, cycle: &Mutex<CycleState>) {
    let _detach = DetachOnExit(controller);
    loop {
        match controller.wait_for_request() {
            CycleStart::Exit => break,
            CycleStart::Run => {
                cycle.lock().run(controller);
                controller.finish_cycle();
            }
        }
    }
    tracing::debug!("fps metrics worker exiting");
}
