//! ---
//! pt_section: "02-reporting"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Concurrent event reporter for the assembly line."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
//! Serialised event reporting for the powertrain assembly line.
//!
//! Producer and consumer threads hand snapshots of their counters to a
//! shared [`ReporterContext`], which renders each one as a single record on
//! the report stream. Records never interleave, and elapsed times are read
//! under the same lock as the write.

pub mod clock;
pub mod error;
pub mod events;
pub mod kinds;
pub mod names;
pub mod record;
pub mod reporter;
pub mod sink;

pub use clock::{ManualClock, MonotonicClock, TimeSource};
pub use error::{ReportError, Result};
pub use events::{ChassisQueueEvent, HistorySnapshot, PowertrainAddedEvent, PowertrainRemovedEvent};
pub use kinds::{
    ChassisConsumerType, Ordinal, PerConsumer, PerPowertrain, PowertrainType, CONSUMER_TYPE_COUNT,
    POWERTRAIN_TYPE_COUNT,
};
pub use names::POWERED_CHASSIS_CONSUMER_NAME;
pub use reporter::{EventReporter, ReporterContext};
pub use sink::SharedBuffer;
