//! ---
//! pt_section: "05-external-interfaces"
//! pt_subsection: "binary"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Binary entrypoint for the assembly-line simulation."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use powertrain_common::config::AppConfig;
use powertrain_common::logging::{init_tracing, LogFormat};
use powertrain_report::{
    ChassisConsumerType, Ordinal, PowertrainType, ReporterContext, POWERED_CHASSIS_CONSUMER_NAME,
};
use powertrain_sim::AssemblyLine;
use tracing::info;

const DEFAULT_CONFIG: &str = "configs/powertrain.toml";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Powertrain assembly-line simulation with a serialised event report",
    long_about = None
)]
struct Cli {
    #[arg(long, value_name = "FILE", help = "Path to configuration file")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "N", help = "Override units produced per powertrain type")]
    units: Option<u64>,

    #[arg(long, value_name = "N", help = "Override the jitter seed")]
    seed: Option<u64>,

    #[arg(long, help = "Randomise production and consumption delays")]
    jitter: bool,

    #[arg(long, value_enum, help = "Override the diagnostic log format")]
    log_format: Option<CliLogFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogFormat {
    Json,
    Pretty,
}

impl From<CliLogFormat> for LogFormat {
    fn from(value: CliLogFormat) -> Self {
        match value {
            CliLogFormat::Json => LogFormat::StructuredJson,
            CliLogFormat::Pretty => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the assembly line and print its report")]
    Run,
    #[command(about = "Print the naming tables used by the report")]
    Names,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut candidates = Vec::new();
    if let Some(path) = &cli.config {
        if !path.exists() {
            bail!("configuration file {} does not exist", path.display());
        }
        candidates.push(path.clone());
    }
    candidates.push(PathBuf::from(DEFAULT_CONFIG));

    let loaded = AppConfig::load_with_source(&candidates)?;
    let mut config = loaded.config;
    if let Some(units) = cli.units {
        config.simulation.units_per_producer = units;
    }
    if let Some(seed) = cli.seed {
        config.simulation.random_seed = seed;
    }
    if cli.jitter {
        config.simulation.jitter = true;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format.into();
    }
    init_tracing("powertrain-simd", &config.logging)?;
    match &loaded.source {
        Some(source) => info!(config = %source.display(), "configuration loaded"),
        None => info!("no configuration file found, using defaults"),
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let reporter = Arc::new(ReporterContext::stdout());
            let summary = AssemblyLine::new(config.simulation, reporter).run()?;
            info!(
                produced = summary.produced.total(),
                consumed = summary.history().total_consumed(),
                chassis = summary.chassis_consumed,
                "simulation complete"
            );
        }
        Commands::Names => print_names(),
    }
    Ok(())
}

fn print_names() {
    for kind in PowertrainType::all() {
        println!(
            "powertrain {}: {} ({})",
            kind.ordinal(),
            kind.short_name(),
            kind.producer_description()
        );
    }
    for consumer in ChassisConsumerType::all() {
        println!("consumer {}: {}", consumer.ordinal(), consumer.display_name());
    }
    println!("downstream: {}", POWERED_CHASSIS_CONSUMER_NAME);
}
