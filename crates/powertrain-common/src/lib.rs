//! ---
//! pt_section: "01-core-functionality"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Shared primitives and utilities for the assembly-line runtime."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
//! Core shared primitives for the powertrain line workspace.
//! This crate exposes configuration loading, tracing setup, and the
//! monotonic time helpers consumed across the workspace.

pub mod config;
pub mod logging;
pub mod time;

pub use config::{AppConfig, LoadedAppConfig, LoggingConfig, SimulationConfig};
pub use logging::{init_tracing, LogFormat};
