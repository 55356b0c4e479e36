//! Adaptive Curve IRM CLI - Quote, simulate and inspect borrow rates.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{run_id, run_rate, run_simulate, run_utilization};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Rate(args) => {
            run_rate(&args, cli.format)?;
        }
        Commands::Simulate(args) => {
            run_simulate(&args, cli.format)?;
        }
        Commands::Id(args) => {
            run_id(&args, cli.format)?;
        }
        Commands::Utilization(args) => {
            run_utilization(&args, cli.format)?;
        }
    }

    Ok(())
}
