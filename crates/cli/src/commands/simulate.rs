//! Timeline replay command.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use adaptive_irm::math::{parse_i256, parse_u256};
use adaptive_irm::{AdaptiveCurveIrm, MarketId, MarketParams, MarketState, RateAtTargetStore};
use alloy_primitives::I256;
use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::{OutputFormat, SimulateArgs};
use crate::output::{format_accruals_table, AccrualRow};

/// A market and the ledger totals observed at each accrual.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub market: MarketParams,
    /// Last accrual before the timeline starts, for scenarios continuing a
    /// restored state
    #[serde(default)]
    pub last_update: u64,
    pub timeline: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
pub struct TimelinePoint {
    pub timestamp: u64,
    pub total_supply_assets: String,
    pub total_borrow_assets: String,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {what} {}", path.display()))
}

/// Loads a `{ market id: rate at target }` snapshot.
pub fn load_snapshot(path: &Path) -> Result<RateAtTargetStore> {
    let raw: BTreeMap<String, String> = read_json(path, "state file")?;
    let entries = raw
        .iter()
        .map(|(id, rate)| -> Result<(MarketId, I256)> {
            let id: MarketId = id
                .parse()
                .with_context(|| format!("Invalid market id in state file: {id}"))?;
            Ok((id, parse_i256(rate)?))
        })
        .collect::<Result<Vec<_>>>()?;
    RateAtTargetStore::restore(entries)
        .with_context(|| format!("Invalid state file {}", path.display()))
}

pub fn save_snapshot(path: &Path, store: &RateAtTargetStore) -> Result<()> {
    let raw: BTreeMap<String, String> = store
        .snapshot()
        .into_iter()
        .map(|(id, rate)| (id.to_string(), rate.to_string()))
        .collect();
    let json = serde_json::to_string_pretty(&raw)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Accrues every timeline point through the mutating entry point.
pub fn replay(irm: &AdaptiveCurveIrm, scenario: &Scenario) -> Result<Vec<AccrualRow>> {
    let id = scenario.market.id();
    let mut last_update = scenario.last_update;
    let mut rows = Vec::with_capacity(scenario.timeline.len());

    for point in &scenario.timeline {
        let state = MarketState::new(
            parse_u256(&point.total_supply_assets)?,
            parse_u256(&point.total_borrow_assets)?,
            last_update,
        );
        let elapsed = if irm.rate_at_target(&id).is_zero() {
            0
        } else {
            point.timestamp.saturating_sub(last_update)
        };

        let result = irm
            .accrue(&scenario.market, &state, point.timestamp)
            .with_context(|| format!("Accrual at {} failed", point.timestamp))?;
        rows.push(AccrualRow::new(
            point.timestamp,
            elapsed,
            state.utilization()?,
            &result,
        ));
        last_update = point.timestamp;
    }

    Ok(rows)
}

pub fn run_simulate(args: &SimulateArgs, format: OutputFormat) -> Result<()> {
    let scenario: Scenario = read_json(&args.scenario, "scenario")?;

    let irm = match &args.state_in {
        Some(path) => AdaptiveCurveIrm::with_store(load_snapshot(path)?),
        None => AdaptiveCurveIrm::new(),
    };

    let rows = replay(&irm, &scenario)?;

    if let Some(path) = &args.state_out {
        save_snapshot(path, irm.store())?;
    }

    match format {
        OutputFormat::Table => {
            println!("{}", format_accruals_table(&rows));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)?;
            println!("{}", json);
        }
    }

    Ok(())
}
