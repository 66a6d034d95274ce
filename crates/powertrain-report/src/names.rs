//! ---
//! pt_section: "02-reporting"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Concurrent event reporter for the assembly line."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
//! Static naming tables indexed by ordinal. Immutable for the process
//! lifetime, so concurrent reads need no synchronisation.

use crate::kinds::{CONSUMER_TYPE_COUNT, POWERTRAIN_TYPE_COUNT};

/// Short names used inside per-type breakdowns.
pub static POWERTRAIN_SHORT_NAMES: [&str; POWERTRAIN_TYPE_COUNT] = ["GAS", "HYBRID"];

/// Producer descriptions used in "Added ..." and history lines.
pub static POWERTRAIN_PRODUCERS: [&str; POWERTRAIN_TYPE_COUNT] =
    ["GasEngine powertrain", "HybridEngine powertrain"];

pub static CHASSIS_CONSUMER_NAMES: [&str; CONSUMER_TYPE_COUNT] = ["Titano", "MegaForce"];

/// Downstream consumer draining the powered chassis queue.
pub const POWERED_CHASSIS_CONSUMER_NAME: &str = "RoboMount";
