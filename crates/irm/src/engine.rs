//! The Adaptive Curve IRM engine.
//!
//! [`AdaptiveCurveIrm`] owns the rate at target of every market it has seen
//! and exposes the two entry points a lending ledger calls on accrual:
//! [`AdaptiveCurveIrm::borrow_rate`], which persists the adapted rate at
//! target, and [`AdaptiveCurveIrm::borrow_rate_view`], which only previews it.
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
//! let state = MarketState::new(U256::from(1_000u64), U256::from(900u64), 0);
//!
//! let rate = irm.borrow_rate(&params, &state, 1_700_000_000).unwrap();
//! assert_eq!(rate, U256::from(317_097_919u64));
//! assert_eq!(irm.rate_at_target(&params.id()), params.curve.initial_rate_at_target());
//! ```

use alloy_primitives::{I256, U256};

use crate::error::{IrmError, Result};
use crate::irm::{get_borrow_rate, BorrowRateResult};
use crate::market::{MarketId, MarketParams, MarketState};
use crate::store::RateAtTargetStore;

/// Adaptive Curve interest rate model with its per-market state.
#[derive(Debug, Default)]
pub struct AdaptiveCurveIrm {
    store: RateAtTargetStore,
}

impl AdaptiveCurveIrm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an engine on top of previously saved state.
    pub fn with_store(store: RateAtTargetStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RateAtTargetStore {
        &self.store
    }

    /// Stored rate at target of a market, zero if it was never seeded.
    pub fn rate_at_target(&self, id: &MarketId) -> I256 {
        self.store.get(id)
    }

    /// Returns the average borrow rate since the last accrual and persists the
    /// adapted rate at target.
    ///
    /// # Errors
    ///
    /// - [`IrmError::InvalidTimestamp`] if the market is seeded and
    ///   `now < state.last_update`; the stored value is left untouched
    /// - [`IrmError::Overflow`] if an intermediate value is out of range
    pub fn borrow_rate(
        &self,
        params: &MarketParams,
        state: &MarketState,
        now: u64,
    ) -> Result<U256> {
        self.accrue(params, state, now)
            .map(|result| result.avg_borrow_rate)
    }

    /// Same as [`borrow_rate`](Self::borrow_rate) without persisting anything.
    pub fn borrow_rate_view(
        &self,
        params: &MarketParams,
        state: &MarketState,
        now: u64,
    ) -> Result<U256> {
        self.quote(params, state, now)
            .map(|result| result.avg_borrow_rate)
    }

    /// Full preview of an accrual: average and end rates plus the rate at
    /// target a mutating call would store.
    pub fn quote(
        &self,
        params: &MarketParams,
        state: &MarketState,
        now: u64,
    ) -> Result<BorrowRateResult> {
        compute(params, state, self.store.get(&params.id()), now)
    }

    /// Mutating accrual, returning the full result.
    pub fn accrue(
        &self,
        params: &MarketParams,
        state: &MarketState,
        now: u64,
    ) -> Result<BorrowRateResult> {
        let id = params.id();
        self.store.update(id, |start_rate_at_target| {
            let result = compute(params, state, start_rate_at_target, now)?;

            if start_rate_at_target.is_zero() && !result.end_rate_at_target.is_zero() {
                tracing::debug!(market = %id, rate_at_target = %result.end_rate_at_target, "seeded market");
            } else if start_rate_at_target != result.end_rate_at_target {
                tracing::debug!(
                    market = %id,
                    from = %start_rate_at_target,
                    to = %result.end_rate_at_target,
                    "persisted rate at target"
                );
            }

            Ok((result.end_rate_at_target, result))
        })
    }
}

fn compute(
    params: &MarketParams,
    state: &MarketState,
    rate_at_target: I256,
    now: u64,
) -> Result<BorrowRateResult> {
    let elapsed = if rate_at_target.is_zero() {
        0
    } else {
        now.checked_sub(state.last_update)
            .ok_or(IrmError::InvalidTimestamp {
                now,
                last_update: state.last_update,
            })?
    };
    get_borrow_rate(&params.curve, state.utilization()?, rate_at_target, elapsed)
}
