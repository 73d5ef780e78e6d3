//! Producer/worker handshake for the live engine.
//!
//! The producer marks requests pending; the worker claims them one cycle at a
//! time. `computing` is tracked apart from `pending` so a request that lands
//! while a cycle runs is kept for the next one.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Condvar, Mutex};

use super::window::SampleWindow;

/// Outcome of the worker waking up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleStart {
    Run,
    Exit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineState {
    pub pending: bool,
    pub computing: bool,
    pub terminating: bool,
    /// A worker is running and will serve pending requests.
    pub attached: bool,
}

impl EngineState {
    /// Marks a request pending. Returns `true` when the worker must be woken.
    pub const fn request(&mut self) -> bool {
        if self.terminating || self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Worker side: claim the pending request, or report that the loop ends.
    ///
    /// Returns `None` when there is nothing to do yet.
    pub const fn begin_cycle(&mut self) -> Option<CycleStart> {
        if self.terminating {
            return Some(CycleStart::Exit);
        }
        if !self.pending || self.computing {
            return None;
        }
        self.pending = false;
        self.computing = true;
        Some(CycleStart::Run)
    }

    pub const fn finish_cycle(&mut self) {
        self.computing = false;
    }

    pub const fn terminate(&mut self) {
        self.terminating = true;
    }

    /// True while a cycle runs or a request will still be served.
    #[must_use]
    pub const fn busy(&self) -> bool {
        self.computing || (self.pending && self.attached && !self.terminating)
    }
}

/// State shared between the engine handle and its worker.
#[derive(Debug, Default)]
pub(crate) struct SyncController {
    state: Mutex<EngineState>,
    /// Wakes the worker.
    wake: Condvar,
    /// Raised whenever the worker goes back to idle.
    idle: Condvar,
    resetting: AtomicBool,
    pub(crate) window: Mutex<SampleWindow>,
}

impl SyncController {
    pub(crate) fn is_resetting(&self) -> bool {
        self.resetting.load(Ordering::Acquire)
    }

    pub(crate) fn is_terminating(&self) -> bool {
        self.state.lock().terminating
    }

    /// Checked under the window lock so no append lands after a reset's clear.
    pub(crate) fn append(&self, timestamp_ns: u64, value: f64) {
        let mut window = self.window.lock();
        if self.is_resetting() {
            return;
        }
        window.append(timestamp_ns, value);
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.state.lock().busy()
    }

    /// Returns `true` when a new request was registered.
    pub(crate) fn request(&self) -> bool {
        let woke = {
            let mut state = self.state.lock();
            !self.is_resetting() && state.request()
        };
        if woke {
            self.wake.notify_one();
        }
        woke
    }

    /// Registers the worker. Fails once the engine is terminating.
    pub(crate) fn attach(&self) -> bool {
        let mut state = self.state.lock();
        if state.terminating {
            return false;
        }
        state.attached = true;
        true
    }

    pub(crate) fn detach(&self) {
        let mut state = self.state.lock();
        state.attached = false;
        state.computing = false;
        drop(state);
        self.idle.notify_all();
    }

    /// Blocks until a request is pending or the engine terminates.
    pub(crate) fn wait_for_request(&self) -> CycleStart {
        let mut state = self.state.lock();
        loop {
            if let Some(start) = state.begin_cycle() {
                return start;
            }
            self.wake.wait(&mut state);
        }
    }

    /// Claims a pending request without blocking.
    pub(crate) fn try_begin(&self) -> Option<CycleStart> {
        self.state.lock().begin_cycle()
    }

    pub(crate) fn finish_cycle(&self) {
        self.state.lock().finish_cycle();
        self.idle.notify_all();
    }

    /// Waits for at most the cycle already running. A request still queued
    /// is dropped.
    pub(crate) fn reset(&self) {
        self.resetting.store(true, Ordering::Release);
        {
            let mut state = self.state.lock();
            state.pending = false;
            while state.computing {
                self.idle.wait(&mut state);
            }
        }
        self.window.lock().clear();
        self.resetting.store(false, Ordering::Release);
    }

    pub(crate) fn terminate(&self) {
        self.state.lock().terminate();
        self.wake.notify_all();
        self.idle.notify_all();
    }
}
