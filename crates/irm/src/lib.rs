//! Adaptive Curve Interest Rate Model
//!
//! This crate computes per-second borrow rates for lending markets from their
//! utilization, and adapts each market's rate at target utilization over time
//! so that the market's equilibrium tracks a target utilization.
//!
//! # Overview
//!
//! - [`math`] - WAD fixed-point kernel with a bounded-error exponential
//! - [`irm`] - Curve parameters, the curve and the pure adaptation step
//! - [`market`] - Market identity and the per-call market inputs
//! - [`store`] - Per-market rate at target state
//! - [`engine`] - The mutating and previewing entry points
//!
//! # Example
//!
//! ```rust
//! use adaptive_irm::{AdaptiveCurveIrm, CurveParams, MarketParams, MarketState};
//! use alloy_primitives::{Address, U256};
//!
//! let irm = AdaptiveCurveIrm::new();
//! let params = MarketParams {
//!     loan_token: Address::repeat_byte(1),
//!     collateral_token: Address::repeat_byte(2),
//!     oracle: Address::repeat_byte(3),
//!     irm: Address::repeat_byte(4),
//!     lltv: U256::from(860_000_000_000_000_000u64),
//!     curve: CurveParams::default(),
//! };
//!
//! // Seed the market, then let a day pass at 95% utilization
//! let busy = MarketState::new(U256::from(100u64), U256::from(95u64), 0);
//! irm.borrow_rate(&params, &busy, 1_000).unwrap();
//! let later = MarketState { last_update: 1_000, ..busy };
//! let preview = irm.borrow_rate_view(&params, &later, 87_400).unwrap();
//! let rate = irm.borrow_rate(&params, &later, 87_400).unwrap();
//!
//! assert_eq!(preview, rate);
//! assert!(irm.rate_at_target(&params.id()) > params.curve.initial_rate_at_target());
//! ```

pub mod engine;
pub mod error;
pub mod irm;
pub mod market;
pub mod math;
pub mod store;

// Re-export commonly used types
pub use engine::AdaptiveCurveIrm;
pub use error::{IrmError, Result};
pub use market::{MarketId, MarketParams, MarketState};
pub use store::RateAtTargetStore;

// Math exports
pub use math::{w_exp, w_exp_rel, SECONDS_PER_YEAR, WAD, WAD_INT};

// IRM exports
pub use irm::{
    get_borrow_rate, is_valid_rate_at_target, new_rate_at_target, supply_for_borrow_rate,
    utilization, utilization_at_borrow_rate, BorrowRateResult, CurveParams, SupplyAdjustment,
    MAX_ADJUSTMENT_SPEED, MAX_CURVE_STEEPNESS, MAX_RATE, MAX_RATE_AT_TARGET, MIN_RATE,
    MIN_RATE_AT_TARGET,
};
