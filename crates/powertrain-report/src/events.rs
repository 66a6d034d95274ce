//! ---
//! pt_section: "02-reporting"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Concurrent event reporter for the assembly line."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
//! Caller-built snapshots handed to the reporter. The simulation owns every
//! counter; the reporter only reads these for the duration of one call.

use crate::kinds::{ChassisConsumerType, PerConsumer, PerPowertrain, PowertrainType};

/// One powertrain unit entered the assembly queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowertrainAddedEvent {
    pub produced_type: PowertrainType,
    /// Cumulative units produced per type.
    pub produced_totals: PerPowertrain<u64>,
    /// Units currently waiting per type.
    pub queue_snapshot: PerPowertrain<u64>,
}

/// One powertrain unit was pulled from the assembly queue by a consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowertrainRemovedEvent {
    pub consumer: ChassisConsumerType,
    pub consumed_type: PowertrainType,
    /// Cumulative units this consumer has taken, per type.
    pub consumed_totals: PerPowertrain<u64>,
    pub queue_snapshot: PerPowertrain<u64>,
}

/// Powered chassis queue movements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChassisQueueEvent {
    Added {
        label: String,
        queue_size: u64,
    },
    Removed {
        label: String,
        queue_size: u64,
        total_consumed: u64,
    },
}

/// Final aggregate, reported once after the line has quiesced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySnapshot {
    pub produced: PerPowertrain<u64>,
    /// Indexed `[consumer][type]`.
    pub consumed: PerConsumer<PerPowertrain<u64>>,
}

impl HistorySnapshot {
    /// Build from raw per-ordinal arrays, checking arity.
    pub fn from_raw<R: AsRef<[u64]>>(produced: &[u64], consumed: &[R]) -> crate::Result<Self> {
        Ok(Self {
            produced: PerPowertrain::from_slice(produced)?,
            consumed: PerConsumer::from_rows(consumed)?,
        })
    }

    /// Everything consumed by every consumer.
    pub fn total_consumed(&self) -> u64 {
        self.consumed
            .values()
            .fold(0u64, |acc, row| acc.saturating_add(row.total()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_history_is_checked() {
        let snapshot = HistorySnapshot::from_raw(&[5, 3], &[[2u64, 1], [3, 2]]).unwrap();
        assert_eq!(snapshot.produced.total(), 8);
        assert_eq!(snapshot.total_consumed(), 8);
        assert!(HistorySnapshot::from_raw(&[5], &[[2u64, 1], [3, 2]]).is_err());
    }
}
