//! ---
//! pt_section: "02-reporting"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Concurrent event reporter for the assembly line."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use powertrain_common::time::monotonic_now;

/// Elapsed-time source read by the reporter while it holds its lock.
pub trait TimeSource: Send {
    /// Time since the source's epoch. Never decreases.
    fn elapsed(&self) -> Duration;

    fn elapsed_seconds(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

/// Wall-clock source with its epoch captured at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            epoch: monotonic_now(),
        }
    }
}

impl TimeSource for MonotonicClock {
    fn elapsed(&self) -> Duration {
        monotonic_now().saturating_duration_since(self.epoch)
    }
}

/// Hand-driven clock for deterministic reports. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `step`.
    pub fn advance(&self, step: Duration) {
        let mut now = self.now.lock();
        *now = now.saturating_add(step);
    }

    /// Jump to `at`; earlier values are ignored so time never runs backwards.
    pub fn set(&self, at: Duration) {
        let mut now = self.now.lock();
        if at > *now {
            *now = at;
        }
    }
}

impl TimeSource for ManualClock {
    fn elapsed(&self) -> Duration {
        *self.now.lock()
    }
}
