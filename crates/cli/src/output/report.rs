//! Serializable command results.
//!
//! Integers are rendered as decimal strings so JSON output keeps full 256-bit
//! precision.

use adaptive_irm::math::{int_to_f64, rate_to_apr, rate_to_apy};
use adaptive_irm::{BorrowRateResult, MarketId, SupplyAdjustment};
use alloy_primitives::I256;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct QuoteReport {
    pub utilization: String,
    pub utilization_fraction: f64,
    pub avg_borrow_rate: String,
    pub end_borrow_rate: String,
    pub end_rate_at_target: String,
    pub avg_borrow_apr: f64,
    pub avg_borrow_apy: f64,
    pub end_borrow_apy: f64,
}

impl QuoteReport {
    pub fn new(utilization: I256, result: &BorrowRateResult) -> Self {
        Self {
            utilization: utilization.to_string(),
            utilization_fraction: int_to_f64(utilization),
            avg_borrow_rate: result.avg_borrow_rate.to_string(),
            end_borrow_rate: result.end_borrow_rate.to_string(),
            end_rate_at_target: result.end_rate_at_target.to_string(),
            avg_borrow_apr: rate_to_apr(result.avg_borrow_rate),
            avg_borrow_apy: rate_to_apy(result.avg_borrow_rate),
            end_borrow_apy: rate_to_apy(result.end_borrow_rate),
        }
    }
}

/// One accrual of a simulated timeline.
#[derive(Debug, Serialize)]
pub struct AccrualRow {
    pub timestamp: u64,
    pub elapsed: u64,
    pub utilization: f64,
    pub avg_borrow_rate: String,
    pub avg_borrow_apy: f64,
    pub end_borrow_apy: f64,
    pub rate_at_target: String,
    pub rate_at_target_apr: f64,
}

impl AccrualRow {
    pub fn new(timestamp: u64, elapsed: u64, utilization: I256, result: &BorrowRateResult) -> Self {
        Self {
            timestamp,
            elapsed,
            utilization: int_to_f64(utilization),
            avg_borrow_rate: result.avg_borrow_rate.to_string(),
            avg_borrow_apy: rate_to_apy(result.avg_borrow_rate),
            end_borrow_apy: rate_to_apy(result.end_borrow_rate),
            rate_at_target: result.end_rate_at_target.to_string(),
            rate_at_target_apr: rate_to_apr(result.end_rate_at_target.unsigned_abs()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarketIdReport {
    pub id: MarketId,
    pub encoded: String,
}

#[derive(Debug, Serialize)]
pub struct UtilizationReport {
    pub utilization: String,
    pub utilization_fraction: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply_change: Option<SupplyChange>,
}

/// Supply change needed to reach the requested rate.
#[derive(Debug, Serialize)]
#[serde(tag = "action", content = "amount", rename_all = "snake_case")]
pub enum SupplyChange {
    Supply(String),
    Withdraw(String),
    Unreachable,
}

impl From<SupplyAdjustment> for SupplyChange {
    fn from(adjustment: SupplyAdjustment) -> Self {
        match adjustment {
            SupplyAdjustment::Supply(amount) => Self::Supply(amount.to_string()),
            SupplyAdjustment::Withdraw(amount) => Self::Withdraw(amount.to_string()),
            SupplyAdjustment::Unreachable => Self::Unreachable,
        }
    }
}

impl UtilizationReport {
    pub fn new(utilization: I256, adjustment: Option<SupplyAdjustment>) -> Self {
        Self {
            utilization: utilization.to_string(),
            utilization_fraction: int_to_f64(utilization),
            supply_change: adjustment.map(SupplyChange::from),
        }
    }
}
