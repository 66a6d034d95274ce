//! ---
//! pt_section: "02-reporting"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Concurrent event reporter for the assembly line."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
//! Record assembly for the report stream.
//!
//! Every record is rendered to a complete `String` before it reaches the
//! sink. Single-event records end in exactly one `\n`; the history record is
//! a multi-line block. Elapsed time always carries three decimals.

use crate::events::{HistorySnapshot, PowertrainAddedEvent, PowertrainRemovedEvent};
use crate::kinds::PerPowertrain;

/// Separator between per-type entries of a breakdown.
pub const BREAKDOWN_SEPARATOR: &str = " + ";

pub const HISTORY_RULE: &str = "----------------------------------------";

/// `"<count> <NAME>"` per type joined by `" + "`, then `" = <sum>"`.
pub fn breakdown(counts: &PerPowertrain<u64>) -> String {
    let parts: Vec<String> = counts
        .iter()
        .map(|(kind, count)| format!("{} {}", count, kind.short_name()))
        .collect();
    format!("{} = {}", parts.join(BREAKDOWN_SEPARATOR), counts.total())
}

/// The added record has no space after `Powertrain_queue:`; the removed
/// record does. Stream parsers depend on both layouts.
pub fn powertrain_added(event: &PowertrainAddedEvent, elapsed_secs: f64) -> String {
    format!(
        "Powertrain_queue:{}. Added {}. Produced: {} in {:.3} s.\n",
        breakdown(&event.queue_snapshot),
        event.produced_type.producer_description(),
        breakdown(&event.produced_totals),
        elapsed_secs
    )
}

pub fn powertrain_removed(event: &PowertrainRemovedEvent, elapsed_secs: f64) -> String {
    let consumer = event.consumer.display_name();
    format!(
        "Powertrain_queue: {}. {} consumed {}. {} totals: {} consumed in {:.3} s.\n",
        breakdown(&event.queue_snapshot),
        consumer,
        event.consumed_type.producer_description(),
        consumer,
        breakdown(&event.consumed_totals),
        elapsed_secs
    )
}

pub fn powered_chassis_added(label: &str, queue_size: u64, elapsed_secs: f64) -> String {
    format!(
        "Poweredchassis_queue: produced and added {} in {:.3} s, queue size: {}\n",
        label, elapsed_secs, queue_size
    )
}

pub fn powered_chassis_removed(
    label: &str,
    queue_size: u64,
    total_consumed: u64,
    elapsed_secs: f64,
) -> String {
    format!(
        "Poweredchassis_queue: removed and consumed {} in {:.3} s, queue size: {}, total consumed: {}\n",
        label, elapsed_secs, queue_size, total_consumed
    )
}

pub fn history(snapshot: &HistorySnapshot, elapsed_secs: f64) -> String {
    let mut lines = vec![
        String::new(),
        "REQUEST REPORT".to_owned(),
        HISTORY_RULE.to_owned(),
    ];
    for (kind, produced) in snapshot.produced.iter() {
        lines.push(format!(
            "{} producer generated {} requests",
            kind.producer_description(),
            produced
        ));
    }
    for (consumer, consumed) in snapshot.consumed.iter() {
        lines.push(format!(
            "{} consumed {} total",
            consumer.display_name(),
            breakdown(consumed)
        ));
    }
    lines.push(format!("Elapsed time {:.3} s", elapsed_secs));

    let mut block = lines.join("\n");
    block.push('\n');
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{ChassisConsumerType, PowertrainType};

    #[test]
    fn breakdown_lists_types_in_order_with_sum() {
        assert_eq!(breakdown(&PerPowertrain::from([2, 1])), "2 GAS + 1 HYBRID = 3");
        assert_eq!(breakdown(&PerPowertrain::default()), "0 GAS + 0 HYBRID = 0");
    }

    #[test]
    fn added_record_layout() {
        let event = PowertrainAddedEvent {
            produced_type: PowertrainType::Gas,
            produced_totals: PerPowertrain::from([5, 3]),
            queue_snapshot: PerPowertrain::from([2, 1]),
        };
        assert_eq!(
            powertrain_added(&event, 1.23456),
            "Powertrain_queue:2 GAS + 1 HYBRID = 3. Added GasEngine powertrain. \
             Produced: 5 GAS + 3 HYBRID = 8 in 1.235 s.\n"
        );
    }

    #[test]
    fn queue_prefixes_keep_their_stream_bytes() {
        let added = PowertrainAddedEvent {
            produced_type: PowertrainType::Gas,
            produced_totals: PerPowertrain::from([5, 3]),
            queue_snapshot: PerPowertrain::from([2, 1]),
        };
        assert_eq!(
            powertrain_added(&added, 0.0).as_bytes(),
            b"Powertrain_queue:2 GAS + 1 HYBRID = 3. Added GasEngine powertrain. Produced: 5 GAS + 3 HYBRID = 8 in 0.000 s.\n"
        );
        let removed = PowertrainRemovedEvent {
            consumer: ChassisConsumerType::Titano,
            consumed_type: PowertrainType::Gas,
            consumed_totals: PerPowertrain::from([1, 0]),
            queue_snapshot: PerPowertrain::from([1, 1]),
        };
        assert!(powertrain_removed(&removed, 0.0).starts_with("Powertrain_queue: 1 GAS"));
    }

    #[test]
    fn removed_record_names_the_consumer() {
        let event = PowertrainRemovedEvent {
            consumer: ChassisConsumerType::MegaForce,
            consumed_type: PowertrainType::Hybrid,
            consumed_totals: PerPowertrain::from([0, 4]),
            queue_snapshot: PerPowertrain::from([1, 0]),
        };
        assert_eq!(
            powertrain_removed(&event, 0.0),
            "Powertrain_queue: 1 GAS + 0 HYBRID = 1. MegaForce consumed HybridEngine powertrain. \
             MegaForce totals: 0 GAS + 4 HYBRID = 4 consumed in 0.000 s.\n"
        );
    }

    #[test]
    fn chassis_records() {
        assert_eq!(
            powered_chassis_added("unit-1", 4, 0.5),
            "Poweredchassis_queue: produced and added unit-1 in 0.500 s, queue size: 4\n"
        );
        assert_eq!(
            powered_chassis_removed("unit-1", 3, 9, 12.0),
            "Poweredchassis_queue: removed and consumed unit-1 in 12.000 s, queue size: 3, total consumed: 9\n"
        );
    }

    #[test]
    fn history_block() {
        let snapshot = HistorySnapshot {
            produced: PerPowertrain::from([5, 3]),
            consumed: [PerPowertrain::from([2, 1]), PerPowertrain::from([3, 2])].into(),
        };
        let expected = "\nREQUEST REPORT\n\
                        ----------------------------------------\n\
                        GasEngine powertrain producer generated 5 requests\n\
                        HybridEngine powertrain producer generated 3 requests\n\
                        Titano consumed 2 GAS + 1 HYBRID = 3 total\n\
                        MegaForce consumed 3 GAS + 2 HYBRID = 5 total\n\
                        Elapsed time 0.042 s\n";
        assert_eq!(history(&snapshot, 0.042), expected);
    }
}
