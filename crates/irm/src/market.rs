//! Market identity and the per-call market inputs.
//!
//! A market is identified by the keccak256 hash of its ABI-encoded
//! configuration, in field order loan token, collateral token, oracle, rate
//! model, liquidation threshold. The encoding is the same one a lending ledger
//! uses to key its own storage, so both sides agree byte for byte.
//!
//! ```rust
//! use adaptive_irm::{CurveParams, MarketParams};
//! use alloy_primitives::{Address, U256};
//!
//! let params = MarketParams {
//!     loan_token: Address::repeat_byte(0x11),
//!     collateral_token: Address::repeat_byte(0x22),
//!     oracle: Address::repeat_byte(0x33),
//!     irm: Address::repeat_byte(0x44),
//!     lltv: U256::from(860_000_000_000_000_000u64),
//!     curve: CurveParams::default(),
//! };
//!
//! // The curve constants are not part of the identity
//! let mut steeper = params.clone();
//! steeper.curve = CurveParams::new(
//!     adaptive_irm::math::int(8_000_000_000_000_000_000),
//!     params.curve.adjustment_speed(),
//!     params.curve.target_utilization(),
//!     params.curve.initial_rate_at_target(),
//! )
//! .unwrap();
//! assert_eq!(params.id(), steeper.id());
//! ```

use alloy_primitives::{keccak256, Address, FixedBytes, I256, U256};
use alloy_sol_types::SolValue;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::irm::{utilization, CurveParams};

/// Unique market identifier (32 bytes)
pub type MarketId = FixedBytes<32>;

/// Immutable configuration of a market, supplied by the caller on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketParams {
    /// Asset being lent and borrowed
    pub loan_token: Address,
    /// Asset posted as collateral
    pub collateral_token: Address,
    /// Price oracle of the market
    pub oracle: Address,
    /// Rate model the market is bound to
    pub irm: Address,
    /// Liquidation loan-to-value (WAD)
    pub lltv: U256,
    /// Curve constants of the rate model
    #[serde(default)]
    pub curve: CurveParams,
}

impl MarketParams {
    /// ABI encoding of the five identity fields, one 32-byte word each.
    pub fn encode_id_fields(&self) -> Vec<u8> {
        (
            self.loan_token,
            self.collateral_token,
            self.oracle,
            self.irm,
            self.lltv,
        )
            .abi_encode()
    }

    /// Derives the market identifier.
    pub fn id(&self) -> MarketId {
        keccak256(self.encode_id_fields())
    }
}

/// Ledger totals of a market at the time of a call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketState {
    /// The amount of loan assets supplied in total on the market
    pub total_supply_assets: U256,
    /// The amount of loan assets borrowed in total from the market
    pub total_borrow_assets: U256,
    /// Timestamp of the previous accrual, zero if the market never accrued
    #[serde(default)]
    pub last_update: u64,
}

impl MarketState {
    pub fn new(total_supply_assets: U256, total_borrow_assets: U256, last_update: u64) -> Self {
        Self {
            total_supply_assets,
            total_borrow_assets,
            last_update,
        }
    }

    /// Current utilization (WAD), zero for an empty market.
    pub fn utilization(&self) -> Result<I256> {
        utilization(self.total_supply_assets, self.total_borrow_assets)
    }
}
