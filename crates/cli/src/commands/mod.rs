//! Command implementations.

pub mod id;
pub mod rate;
pub mod simulate;
pub mod utilization;

pub use id::run_id;
pub use rate::run_rate;
pub use simulate::run_simulate;
pub use utilization::run_utilization;

use adaptive_irm::{CurveParams, MarketParams};
use alloy_primitives::{Address, U256};

/// Placeholder market for commands that only need a curve.
pub(crate) fn anonymous_market(curve: CurveParams) -> MarketParams {
    MarketParams {
        loan_token: Address::ZERO,
        collateral_token: Address::ZERO,
        oracle: Address::ZERO,
        irm: Address::ZERO,
        lltv: U256::ZERO,
        curve,
    }
}
