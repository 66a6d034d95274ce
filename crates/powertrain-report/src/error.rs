//! ---
//! pt_section: "02-reporting"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Concurrent event reporter for the assembly line."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("powertrain ordinal {ordinal} out of range (expected < {count})")]
    UnknownPowertrain { ordinal: usize, count: usize },
    #[error("chassis consumer ordinal {ordinal} out of range (expected < {count})")]
    UnknownConsumer { ordinal: usize, count: usize },
    #[error("{table} table expects {expected} entries, got {actual}")]
    ArityMismatch {
        table: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("failed to write {record} record to report sink: {source}")]
    Sink {
        record: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Caller contract violations, as opposed to sink failures.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, ReportError::Sink { .. })
    }
}
