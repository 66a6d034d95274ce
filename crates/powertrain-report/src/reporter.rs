//! ---
//! pt_section: "02-reporting"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Concurrent event reporter for the assembly line."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
use std::fmt;
use std::io::{self, Write};

use parking_lot::Mutex;
use powertrain_logging::{pt_debug, pt_error, LogContext};

use crate::clock::{MonotonicClock, TimeSource};
use crate::error::{ReportError, Result};
use crate::events::{
    ChassisQueueEvent, HistorySnapshot, PowertrainAddedEvent, PowertrainRemovedEvent,
};
use crate::record;

/// Entry points the simulation engine calls whenever a worker's state changes.
///
/// Each call renders exactly one record and writes it without interleaving
/// with any other call on the same reporter.
pub trait EventReporter: Send + Sync {
    fn report_powertrain_added(&self, event: &PowertrainAddedEvent) -> Result<()>;

    fn report_powertrain_removed(&self, event: &PowertrainRemovedEvent) -> Result<()>;

    fn report_powered_chassis_added(&self, label: &str, queue_size: u64) -> Result<()>;

    fn report_powered_chassis_removed(
        &self,
        label: &str,
        queue_size: u64,
        total_consumed: u64,
    ) -> Result<()>;

    /// Final aggregate block, expected once after all workers have stopped.
    fn report_history(&self, snapshot: &HistorySnapshot) -> Result<()>;

    fn report_chassis_event(&self, event: &ChassisQueueEvent) -> Result<()> {
        match event {
            ChassisQueueEvent::Added { label, queue_size } => {
                self.report_powered_chassis_added(label, *queue_size)
            }
            ChassisQueueEvent::Removed {
                label,
                queue_size,
                total_consumed,
            } => self.report_powered_chassis_removed(label, *queue_size, *total_consumed),
        }
    }
}

struct ReporterState<W> {
    sink: W,
    clock: Box<dyn TimeSource>,
    /// A failed write left part of a record in the sink.
    torn: bool,
}

/// Counts the bytes the inner writer accepted.
struct Tally<'a, W> {
    inner: &'a mut W,
    written: usize,
}

impl<W: Write> Write for Tally<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Process-wide reporting state: the sink and the clock behind one lock.
///
/// Construct once at simulation start and share it (usually as
/// `Arc<ReporterContext<_>>`). The clock epoch is captured on construction,
/// and every clock read happens under the same lock as the write, so elapsed
/// times never decrease in stream order.
pub struct ReporterContext<W = io::Stdout> {
    state: Mutex<ReporterState<W>>,
}

impl ReporterContext<io::Stdout> {
    /// Reporter writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ReporterContext<W> {
    pub fn new(sink: W) -> Self {
        Self::with_clock(sink, MonotonicClock::start())
    }

    pub fn with_clock(sink: W, clock: impl TimeSource + 'static) -> Self {
        Self {
            state: Mutex::new(ReporterState {
                sink,
                clock: Box::new(clock),
                torn: false,
            }),
        }
    }

    pub fn into_sink(self) -> W {
        self.state.into_inner().sink
    }

    /// Render and write one record as a single critical section. The guard
    /// is dropped on every path, including a failed write.
    ///
    /// A sink that accepts part of a record and then fails leaves that
    /// fragment in the stream. The next record written is prefixed with a
    /// newline so it still starts on its own line.
    fn emit(&self, kind: &'static str, render: impl FnOnce(f64) -> String) -> Result<()> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let elapsed_secs = state.clock.elapsed_seconds();
        let mut line = render(elapsed_secs);
        if state.torn {
            line.insert(0, '\n');
        }
        let mut out = Tally {
            inner: &mut state.sink,
            written: 0,
        };
        let outcome = out.write_all(line.as_bytes()).and_then(|()| out.flush());
        let written = out.written;
        if written > 0 {
            state.torn = written < line.len();
        }
        if let Err(source) = outcome {
            pt_error!(
                context = LogContext::new().with_station("reporter"),
                "failed to write {} record: {}",
                kind,
                source
            );
            return Err(ReportError::Sink {
                record: kind,
                source,
            });
        }
        tracing::trace!(record = kind, elapsed_secs, "report record written");
        Ok(())
    }
}

impl<W: Write + Send> EventReporter for ReporterContext<W> {
    fn report_powertrain_added(&self, event: &PowertrainAddedEvent) -> Result<()> {
        self.emit("powertrain-added", |elapsed| {
            record::powertrain_added(event, elapsed)
        })
    }

    fn report_powertrain_removed(&self, event: &PowertrainRemovedEvent) -> Result<()> {
        self.emit("powertrain-removed", |elapsed| {
            record::powertrain_removed(event, elapsed)
        })
    }

    fn report_powered_chassis_added(&self, label: &str, queue_size: u64) -> Result<()> {
        self.emit("chassis-added", |elapsed| {
            record::powered_chassis_added(label, queue_size, elapsed)
        })
    }

    fn report_powered_chassis_removed(
        &self,
        label: &str,
        queue_size: u64,
        total_consumed: u64,
    ) -> Result<()> {
        self.emit("chassis-removed", |elapsed| {
            record::powered_chassis_removed(label, queue_size, total_consumed, elapsed)
        })
    }

    fn report_history(&self, snapshot: &HistorySnapshot) -> Result<()> {
        pt_debug!(
            "writing history for {} produced and {} consumed units",
            snapshot.produced.total(),
            snapshot.total_consumed()
        );
        self.emit("history", |elapsed| record::history(snapshot, elapsed))
    }
}

impl<W> fmt::Debug for ReporterContext<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReporterContext").finish_non_exhaustive()
    }
}
