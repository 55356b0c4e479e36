//! Inverse curve command.

use adaptive_irm::math::{parse_i256, parse_u256};
use adaptive_irm::{supply_for_borrow_rate, utilization_at_borrow_rate};
use anyhow::{Context, Result};

use crate::cli::{OutputFormat, UtilizationArgs};
use crate::config::resolve_curve;
use crate::output::{format_utilization_detail, UtilizationReport};

pub fn run_utilization(args: &UtilizationArgs, format: OutputFormat) -> Result<()> {
    let curve = resolve_curve(&args.curve)?;
    let borrow_rate = parse_u256(&args.borrow_rate).context("Invalid --borrow-rate")?;
    let rate_at_target = parse_i256(&args.rate_at_target).context("Invalid --rate-at-target")?;

    let utilization = utilization_at_borrow_rate(&curve, borrow_rate, rate_at_target)?;

    let adjustment = match (&args.supply, &args.borrow) {
        (Some(supply), Some(borrow)) => Some(supply_for_borrow_rate(
            &curve,
            parse_u256(supply).context("Invalid --supply")?,
            parse_u256(borrow).context("Invalid --borrow")?,
            borrow_rate,
            rate_at_target,
        )?),
        _ => None,
    };

    let report = UtilizationReport::new(utilization, adjustment);

    match format {
        OutputFormat::Table => {
            println!("{}", format_utilization_detail(&report));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
    }

    Ok(())
}
