//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Adaptive Curve IRM CLI - Quote and simulate borrow rates
#[derive(Parser, Debug)]
#[command(name = "irm")]
#[command(about = "CLI tool for the Adaptive Curve interest rate model", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Log engine events to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Preview the borrow rate of one market state without persisting anything
    Rate(RateArgs),
    /// Replay a utilization timeline through the engine
    Simulate(SimulateArgs),
    /// Derive a market identifier from its configuration
    Id(IdArgs),
    /// Find the utilization that produces a borrow rate
    Utilization(UtilizationArgs),
}

/// Curve constants, as WAD integers. Flags override `--curve`, which
/// overrides the defaults.
#[derive(Args, Debug, Default)]
pub struct CurveArgs {
    /// JSON file with curve constants
    #[arg(long)]
    pub curve: Option<PathBuf>,

    /// Rate multiplier at 100% utilization (WAD)
    #[arg(long, env = "IRM_CURVE_STEEPNESS")]
    pub curve_steepness: Option<String>,

    /// Adaptation speed per second (WAD)
    #[arg(long, env = "IRM_ADJUSTMENT_SPEED")]
    pub adjustment_speed: Option<String>,

    /// Target utilization (WAD)
    #[arg(long, env = "IRM_TARGET_UTILIZATION")]
    pub target_utilization: Option<String>,

    /// Rate at target of a new market, per second (WAD)
    #[arg(long, env = "IRM_INITIAL_RATE_AT_TARGET")]
    pub initial_rate_at_target: Option<String>,
}

#[derive(Parser, Debug)]
pub struct RateArgs {
    /// Total supplied assets
    #[arg(long)]
    pub supply: String,

    /// Total borrowed assets
    #[arg(long)]
    pub borrow: String,

    /// Current rate at target per second (WAD); omit for a market's first accrual
    #[arg(long)]
    pub rate_at_target: Option<String>,

    /// Seconds since the last accrual
    #[arg(long, default_value = "0")]
    pub elapsed: u64,

    #[command(flatten)]
    pub curve: CurveArgs,
}

#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Scenario file: a market and its timeline of totals
    pub scenario: PathBuf,

    /// Restore engine state from a snapshot before replaying
    #[arg(long)]
    pub state_in: Option<PathBuf>,

    /// Write the final engine state snapshot to this file
    #[arg(long)]
    pub state_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct IdArgs {
    /// Loan token address
    #[arg(long)]
    pub loan_token: String,

    /// Collateral token address
    #[arg(long)]
    pub collateral_token: String,

    /// Oracle address
    #[arg(long)]
    pub oracle: String,

    /// Rate model address
    #[arg(long)]
    pub irm: String,

    /// Liquidation loan-to-value (WAD)
    #[arg(long)]
    pub lltv: String,
}

#[derive(Parser, Debug)]
pub struct UtilizationArgs {
    /// Borrow rate per second to solve for (WAD)
    #[arg(long)]
    pub borrow_rate: String,

    /// Current rate at target per second (WAD)
    #[arg(long)]
    pub rate_at_target: String,

    /// Total supplied assets, to report the supply change needed
    #[arg(long, requires = "borrow")]
    pub supply: Option<String>,

    /// Total borrowed assets, to report the supply change needed
    #[arg(long, requires = "supply")]
    pub borrow: Option<String>,

    #[command(flatten)]
    pub curve: CurveArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
