//! ---
//! pt_section: "03-logging"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Structured diagnostic logging adapters."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
#![warn(missing_docs)]
//! Diagnostic logging for the assembly line. These events describe the
//! workers themselves and never reach the report stream.

use tracing::Level;

pub mod macros;

#[doc(hidden)]
pub use tracing;

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Line station emitting the event (producer, consumer, downstream).
    pub station: Option<&'a str>,
    /// Worker name within the station.
    pub worker: Option<&'a str>,
    /// Per-worker sequence number.
    pub sequence: Option<u64>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a station descriptor.
    pub fn with_station(mut self, station: &'a str) -> Self {
        self.station = Some(station);
        self
    }

    /// Attach a worker name.
    pub fn with_worker(mut self, worker: &'a str) -> Self {
        self.worker = Some(worker);
        self
    }

    /// Attach a sequence number.
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = Some(sequence);
        self
    }
}

/// High-level outcome used when emitting lifecycle log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemEventOutcome {
    /// The operation completed successfully.
    Success,
    /// The operation failed or was aborted.
    Fault,
}

impl SystemEventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            SystemEventOutcome::Success => "success",
            SystemEventOutcome::Fault => "fault",
        }
    }
}

/// Emit a standardized lifecycle event with a success/fault outcome.
pub fn log_system_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: SystemEventOutcome,
) {
    let default_ctx = LogContext::default();
    let ctx = context.unwrap_or(&default_ctx);
    // `tracing::event!` needs a constant level, hence the split.
    match outcome {
        SystemEventOutcome::Success => tracing::event!(
            Level::INFO,
            event,
            outcome = outcome.as_str(),
            station = ctx.station.unwrap_or(""),
            worker = ctx.worker.unwrap_or(""),
            sequence = ctx.sequence.unwrap_or_default(),
            message = %message
        ),
        SystemEventOutcome::Fault => tracing::event!(
            Level::ERROR,
            event,
            outcome = outcome.as_str(),
            station = ctx.station.unwrap_or(""),
            worker = ctx.worker.unwrap_or(""),
            sequence = ctx.sequence.unwrap_or_default(),
            message = %message
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(body: impl FnOnce()) -> String {
        let out = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(out.clone())
            .with_ansi(false)
            .with_max_level(Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, body);
        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn macros_carry_context_fields() {
        let logs = capture(|| {
            let ctx = LogContext::new()
                .with_station("producer")
                .with_worker("GAS");
            pt_info!(context = ctx.clone(), "producer online");
            pt_debug!("debug message");
            pt_warn!(context = ctx.clone().with_sequence(3), "queue full");
            pt_error!(context = ctx, "sink failure: {}", "broken pipe");
        });
        assert!(logs.contains("producer online"));
        assert!(logs.contains("debug message"));
        assert!(logs.contains("sink failure: broken pipe"));
        assert!(logs.contains("GAS"));
    }

    #[test]
    fn system_events_use_outcome_level() {
        let logs = capture(|| {
            let ctx = LogContext::new().with_station("line");
            log_system_event(
                Some(&ctx),
                "line.start",
                "assembly line started",
                SystemEventOutcome::Success,
            );
            log_system_event(
                None,
                "line.stop",
                "assembly line aborted",
                SystemEventOutcome::Fault,
            );
        });
        let lines: Vec<&str> = logs.lines().collect();
        assert_eq!(lines.len(), 2, "{logs}");
        assert!(lines[0].contains("INFO") && lines[0].contains("line.start"));
        assert!(lines[0].contains("success"));
        assert!(lines[1].contains("ERROR") && lines[1].contains("line.stop"));
        assert!(lines[1].contains("fault"));
    }
}
