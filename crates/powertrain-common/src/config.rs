//! ---
//! pt_section: "01-core-functionality"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Shared primitives and utilities for the assembly-line runtime."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use tracing::debug;

use crate::logging::LogFormat;

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_ansi() -> bool {
    false
}

fn default_units_per_producer() -> u64 {
    10
}

fn default_powertrain_queue_capacity() -> usize {
    4
}

fn default_chassis_queue_capacity() -> usize {
    3
}

fn default_production_delay() -> Duration {
    Duration::from_millis(5)
}

fn default_consumption_delay() -> Duration {
    Duration::from_millis(8)
}

fn default_simulation_seed() -> u64 {
    0xC4A551u64
}

/// Primary configuration object for the simulation daemon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    /// `None` when no file was found and defaults were used.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &str = "PT_CONFIG";

    /// Load configuration from disk, respecting the `PT_CONFIG` override.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration together with the effective source path.
    ///
    /// An explicit `PT_CONFIG` path must exist. Candidates are optional and the
    /// first one present wins; with none present the defaults apply.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(LoadedAppConfig {
            config: AppConfig::default(),
            source: None,
        })
    }

    fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Diagnostic logging settings. The report stream itself is not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            ansi: default_ansi(),
        }
    }
}

/// Parameters for the threaded producer/consumer driver.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_units_per_producer")]
    pub units_per_producer: u64,
    #[serde(default = "default_powertrain_queue_capacity")]
    pub powertrain_queue_capacity: usize,
    #[serde(default = "default_chassis_queue_capacity")]
    pub chassis_queue_capacity: usize,
    /// Chassis the downstream consumer drains; defaults to everything produced.
    #[serde(default)]
    pub chassis_to_consume: Option<u64>,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_production_delay")]
    pub production_delay: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_consumption_delay")]
    pub consumption_delay: Duration,
    #[serde(default)]
    pub jitter: bool,
    #[serde(default = "default_simulation_seed")]
    pub random_seed: u64,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.powertrain_queue_capacity == 0 {
            return Err(anyhow!("powertrain_queue_capacity must be greater than zero"));
        }
        if self.chassis_queue_capacity == 0 {
            return Err(anyhow!("chassis_queue_capacity must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            units_per_producer: default_units_per_producer(),
            powertrain_queue_capacity: default_powertrain_queue_capacity(),
            chassis_queue_capacity: default_chassis_queue_capacity(),
            chassis_to_consume: None,
            production_delay: default_production_delay(),
            consumption_delay: default_consumption_delay(),
            jitter: false,
            random_seed: default_simulation_seed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_empty_document() {
        let config: AppConfig = "".parse().unwrap();
        assert_eq!(config.simulation.units_per_producer, 10);
        assert_eq!(config.simulation.production_delay, Duration::from_millis(5));
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn durations_are_milliseconds() {
        let config: AppConfig = r#"
            [simulation]
            production_delay = 12
            consumption_delay = 0
            jitter = true
        "#
        .parse()
        .unwrap();
        assert_eq!(config.simulation.production_delay, Duration::from_millis(12));
        assert_eq!(config.simulation.consumption_delay, Duration::ZERO);
        assert!(config.simulation.jitter);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = r#"
            [simulation]
            powertrain_queue_capacity = 0
        "#
        .parse::<AppConfig>()
        .unwrap_err();
        assert!(err.to_string().contains("powertrain_queue_capacity"));
    }

    #[test]
    fn log_format_is_kebab_case() {
        let config: AppConfig = r#"
            [logging]
            format = "structured-json"
        "#
        .parse()
        .unwrap();
        assert_eq!(config.logging.format, LogFormat::StructuredJson);
    }
}
