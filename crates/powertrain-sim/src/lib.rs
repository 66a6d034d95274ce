//! ---
//! pt_section: "11-simulation"
//! pt_subsection: "01-bootstrap"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Simulation runtime module exports and shared types."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
//! Threaded assembly line used to drive the event reporter end to end.

pub mod line;
pub mod queues;

pub use line::{AssemblyLine, SimulationSummary};
