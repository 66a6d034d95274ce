//! ---
//! pt_section: "11-simulation"
//! pt_subsection: "02-queues"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Bounded queues shared by the assembly-line workers."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
//! Bounded blocking queues for the two line stages.
//!
//! The `observe` callbacks run while the queue lock is held, so whatever
//! they report reflects the queue exactly as it was after the operation.
//! Lock order is always queue first, reporter second.

use std::collections::VecDeque;

use anyhow::Result;
use parking_lot::{Condvar, Mutex};
use powertrain_report::{PerPowertrain, PowertrainType};

/// Counters visible after a powertrain queue operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    /// Units currently waiting, per type.
    pub waiting: PerPowertrain<u64>,
    /// Units ever pushed, per type.
    pub produced: PerPowertrain<u64>,
}

#[derive(Debug)]
struct PowertrainState {
    items: VecDeque<PowertrainType>,
    snapshot: QueueSnapshot,
    open_producers: usize,
    aborted: bool,
}

/// Shared powertrain queue between producers and chassis consumers.
#[derive(Debug)]
pub struct PowertrainQueue {
    state: Mutex<PowertrainState>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl PowertrainQueue {
    pub fn new(capacity: usize, producers: usize) -> Self {
        Self {
            state: Mutex::new(PowertrainState {
                items: VecDeque::with_capacity(capacity),
                snapshot: QueueSnapshot::default(),
                open_producers: producers,
                aborted: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity: capacity.max(1),
        }
    }

    /// Block while full, then enqueue. Returns `false` if the line was aborted.
    pub fn push(
        &self,
        kind: PowertrainType,
        observe: impl FnOnce(&QueueSnapshot) -> Result<()>,
    ) -> Result<bool> {
        let mut state = self.state.lock();
        while state.items.len() >= self.capacity && !state.aborted {
            self.not_full.wait(&mut state);
        }
        if state.aborted {
            return Ok(false);
        }
        state.items.push_back(kind);
        state.snapshot.waiting[kind] += 1;
        state.snapshot.produced[kind] += 1;
        observe(&state.snapshot)?;
        self.not_empty.notify_one();
        Ok(true)
    }

    /// Block until a unit is available. `None` once every producer has
    /// finished and the queue is drained, or after an abort.
    pub fn pop(
        &self,
        observe: impl FnOnce(PowertrainType, &QueueSnapshot) -> Result<()>,
    ) -> Result<Option<PowertrainType>> {
        let mut state = self.state.lock();
        while state.items.is_empty() && state.open_producers > 0 && !state.aborted {
            self.not_empty.wait(&mut state);
        }
        if state.aborted {
            return Ok(None);
        }
        let Some(kind) = state.items.pop_front() else {
            return Ok(None);
        };
        state.snapshot.waiting[kind] -= 1;
        observe(kind, &state.snapshot)?;
        self.not_full.notify_one();
        Ok(Some(kind))
    }

    pub fn producer_finished(&self) {
        let mut state = self.state.lock();
        state.open_producers = state.open_producers.saturating_sub(1);
        if state.open_producers == 0 {
            self.not_empty.notify_all();
        }
    }

    pub fn abort(&self) {
        self.state.lock().aborted = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        self.state.lock().snapshot
    }
}

#[derive(Debug)]
struct ChassisState {
    items: VecDeque<String>,
    consumed: u64,
    open_producers: usize,
    closed: bool,
}

/// Powered chassis queue drained by the downstream consumer.
#[derive(Debug)]
pub struct ChassisQueue {
    state: Mutex<ChassisState>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl ChassisQueue {
    pub fn new(capacity: usize, producers: usize) -> Self {
        Self {
            state: Mutex::new(ChassisState {
                items: VecDeque::with_capacity(capacity),
                consumed: 0,
                open_producers: producers,
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity: capacity.max(1),
        }
    }

    /// Block while full, then enqueue; `observe` receives the new size.
    /// Returns `false` without enqueueing once the queue is closed.
    pub fn push(
        &self,
        label: String,
        observe: impl FnOnce(&str, u64) -> Result<()>,
    ) -> Result<bool> {
        let mut state = self.state.lock();
        while state.items.len() >= self.capacity && !state.closed {
            self.not_full.wait(&mut state);
        }
        if state.closed {
            return Ok(false);
        }
        observe(&label, state.items.len() as u64 + 1)?;
        state.items.push_back(label);
        self.not_empty.notify_one();
        Ok(true)
    }

    /// Block until a chassis is available; `observe` receives the remaining
    /// size and the running consumed total.
    pub fn pop(&self, observe: impl FnOnce(&str, u64, u64) -> Result<()>) -> Result<Option<String>> {
        let mut state = self.state.lock();
        while state.items.is_empty() && state.open_producers > 0 && !state.closed {
            self.not_empty.wait(&mut state);
        }
        if state.closed {
            return Ok(None);
        }
        let Some(label) = state.items.pop_front() else {
            return Ok(None);
        };
        state.consumed += 1;
        observe(&label, state.items.len() as u64, state.consumed)?;
        self.not_full.notify_one();
        Ok(Some(label))
    }

    pub fn producer_finished(&self) {
        let mut state = self.state.lock();
        state.open_producers = state.open_producers.saturating_sub(1);
        if state.open_producers == 0 {
            self.not_empty.notify_all();
        }
    }

    /// Stop accepting and handing out chassis; wakes every waiter.
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn push_and_pop_track_snapshots() {
        let queue = PowertrainQueue::new(4, 1);
        queue
            .push(PowertrainType::Gas, |snapshot| {
                assert_eq!(snapshot.waiting.total(), 1);
                Ok(())
            })
            .unwrap();
        queue.push(PowertrainType::Hybrid, |_| Ok(())).unwrap();
        let popped = queue
            .pop(|kind, snapshot| {
                assert_eq!(kind, PowertrainType::Gas);
                assert_eq!(snapshot.waiting[PowertrainType::Gas], 0);
                assert_eq!(snapshot.produced.total(), 2);
                Ok(())
            })
            .unwrap();
        assert_eq!(popped, Some(PowertrainType::Gas));
        queue.producer_finished();
        assert_eq!(queue.pop(|_, _| Ok(())).unwrap(), Some(PowertrainType::Hybrid));
        assert_eq!(queue.pop(|_, _| Ok(())).unwrap(), None);
    }

    #[test]
    fn full_queue_blocks_until_popped() {
        let queue = Arc::new(PowertrainQueue::new(1, 1));
        queue.push(PowertrainType::Gas, |_| Ok(())).unwrap();
        let pusher = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.push(PowertrainType::Hybrid, |_| Ok(())).unwrap())
        };
        assert_eq!(queue.pop(|_, _| Ok(())).unwrap(), Some(PowertrainType::Gas));
        assert!(pusher.join().unwrap());
        assert_eq!(queue.snapshot().waiting[PowertrainType::Hybrid], 1);
    }

    #[test]
    fn abort_releases_blocked_consumers() {
        let queue = Arc::new(PowertrainQueue::new(2, 1));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop(|_, _| Ok(())).unwrap())
        };
        queue.abort();
        assert_eq!(consumer.join().unwrap(), None);
        assert!(!queue.push(PowertrainType::Gas, |_| Ok(())).unwrap());
    }

    #[test]
    fn observe_errors_propagate() {
        let queue = PowertrainQueue::new(2, 1);
        let err = queue
            .push(PowertrainType::Gas, |_| Err(anyhow::anyhow!("sink gone")))
            .unwrap_err();
        assert_eq!(err.to_string(), "sink gone");
    }

    #[test]
    fn chassis_queue_counts_consumption() {
        let queue = ChassisQueue::new(2, 1);
        queue
            .push("Titano-GAS-1".into(), |label, size| {
                assert_eq!((label, size), ("Titano-GAS-1", 1));
                Ok(())
            })
            .unwrap();
        queue.producer_finished();
        let label = queue
            .pop(|label, size, consumed| {
                assert_eq!((label, size, consumed), ("Titano-GAS-1", 0, 1));
                Ok(())
            })
            .unwrap();
        assert_eq!(label.as_deref(), Some("Titano-GAS-1"));
        assert_eq!(queue.pop(|_, _, _| Ok(())).unwrap(), None);
    }

    #[test]
    fn closed_chassis_queue_rejects_pushes() {
        let queue = ChassisQueue::new(1, 1);
        queue.close();
        assert!(!queue.push("late".into(), |_, _| Ok(())).unwrap());
    }
}
