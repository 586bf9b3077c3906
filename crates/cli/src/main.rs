//! Netprobe CLI
//!
//! Command-line host for the network device monitoring drivers: loads the
//! device inventory, runs a driver's validate or collect entry point
//! against one device, and renders the result as a terminal table or JSON.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Network device monitoring drivers
#[derive(Parser)]
#[command(name = "netprobe")]
#[command(author, version, about = "Network device monitoring drivers", long_about = None)]
pub struct Cli {
    /// Path to the device inventory (can also be set via NETPROBE_CONFIG)
    #[arg(long, env = "NETPROBE_CONFIG", default_value = "netprobe.toml")]
    pub config: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the configured devices
    List,

    /// Check connectivity and credentials for a device
    Validate {
        /// Device name from the inventory
        device: String,
    },

    /// Collect status data from a device
    Collect {
        /// Device name from the inventory
        device: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_target(false))
        .init();

    let inventory = config::load(&cli.config)?;

    let result = match &cli.command {
        Commands::List => commands::list::run(&inventory, cli.format),
        Commands::Validate { device } => commands::validate::run(inventory.device(device)?).await,
        Commands::Collect { device } => {
            commands::collect::run(inventory.device(device)?, cli.format).await
        }
    };

    if let Err(err) = result {
        output::print_error(&err.to_string());
        std::process::exit(1);
    }

    Ok(())
}
