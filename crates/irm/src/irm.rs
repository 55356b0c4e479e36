//! Adaptive Curve Interest Rate Model (IRM) implementation.
//!
//! The Adaptive Curve IRM derives a per-second borrow rate from market
//! utilization and lets the reference rate at target utilization drift over
//! time so that the market's equilibrium tracks the target.
//!
//! # How the IRM Works
//!
//! ## 1. The Curve Function
//!
//! The borrow rate is determined by a curve centered at the target utilization:
//!
//! ```text
//! error = (utilization - target) / normalization_factor      in [-1, 1]
//!
//! If error >= 0:
//!     rate = rate_at_target * (1 + (steepness - 1) * error)      // Steep increase above target
//! If error < 0:
//!     rate = rate_at_target * (1 + (1 - 1 / steepness) * error)  // Gradual decrease below target
//! ```
//!
//! At 100% utilization the rate is `steepness * rate_at_target`, at 0% it is
//! `rate_at_target / steepness`.
//!
//! ## 2. Rate Adaptation
//!
//! Between two accruals `rate_at_target` follows
//! `rate_at_target * e^(adjustment_speed * error * elapsed)`, clamped to
//! [`MIN_RATE_AT_TARGET`, `MAX_RATE_AT_TARGET`]. The rate returned for the
//! interval is the curve applied to the time average of that path,
//! `rate_at_target * (e^x - 1) / x`, so accrual uses the mean rate actually in
//! effect rather than either endpoint.
//!
//! # Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_RATE_AT_TARGET` | 0.1% APR | Minimum rate at target |
//! | `MAX_RATE_AT_TARGET` | 200% APR | Maximum rate at target |
//! | `MIN_RATE` | 0.01% APR | Floor of any returned rate |
//! | `MAX_RATE` | 1000% APR | Ceiling of any returned rate |
//! | `DEFAULT_CURVE_STEEPNESS` | 4.0 | Rate multiplier at 100% utilization |
//! | `DEFAULT_ADJUSTMENT_SPEED` | 50/year | How fast rate_at_target adapts |
//! | `DEFAULT_TARGET_UTILIZATION` | 90% | Optimal utilization rate |
//! | `DEFAULT_INITIAL_RATE_AT_TARGET` | 1% APR | Starting rate for new markets |
//!
//! # Example
//!
//! ```rust
//! use adaptive_irm::irm::{get_borrow_rate, CurveParams, DEFAULT_INITIAL_RATE_AT_TARGET};
//! use adaptive_irm::math::{int, rate_to_apr};
//!
//! let curve = CurveParams::default();
//!
//! // Exactly at target utilization the borrow rate equals rate_at_target
//! let at_target = int(900_000_000_000_000_000);
//! let result = get_borrow_rate(&curve, at_target, DEFAULT_INITIAL_RATE_AT_TARGET, 86_400).unwrap();
//! assert_eq!(result.end_rate_at_target, DEFAULT_INITIAL_RATE_AT_TARGET);
//!
//! let apr = rate_to_apr(result.avg_borrow_rate);
//! assert!(apr > 0.009 && apr < 0.011);
//! ```

use alloy_primitives::{I256, U256};
use serde::{Deserialize, Serialize};

use crate::error::{IrmError, Result};
use crate::math::{
    checked_add, checked_sub, int, parse_i256, to_int, to_uint, w_div, w_div_up, w_exp,
    w_exp_rel, w_mul, WAD_INT,
};

/// Minimum rate at target (0.1% APR / seconds_per_year)
pub const MIN_RATE_AT_TARGET: I256 = int(31_709_791);

/// Maximum rate at target (200% APR / seconds_per_year)
pub const MAX_RATE_AT_TARGET: I256 = int(63_419_583_967);

/// Floor of any returned borrow rate (0.01% APR / seconds_per_year)
pub const MIN_RATE: I256 = int(3_170_979);

/// Ceiling of any returned borrow rate (1000% APR / seconds_per_year)
pub const MAX_RATE: I256 = int(317_097_919_837);

/// Maximum accepted curve steepness (100.0 in WAD)
pub const MAX_CURVE_STEEPNESS: I256 = int(100_000_000_000_000_000_000);

/// Maximum accepted adjustment speed (1000 per year / seconds_per_year)
pub const MAX_ADJUSTMENT_SPEED: I256 = int(31_709_791_983_764);

/// Default curve steepness (4.0 in WAD)
pub const DEFAULT_CURVE_STEEPNESS: I256 = int(4_000_000_000_000_000_000);

/// Default adjustment speed (50 per year / seconds_per_year)
pub const DEFAULT_ADJUSTMENT_SPEED: I256 = int(1_585_489_599_188);

/// Default target utilization (90% in WAD)
pub const DEFAULT_TARGET_UTILIZATION: I256 = int(900_000_000_000_000_000);

/// Default initial rate at target (1% APR / seconds_per_year)
pub const DEFAULT_INITIAL_RATE_AT_TARGET: I256 = int(317_097_919);

/// Immutable per-market curve constants.
///
/// Only constructible through [`CurveParams::new`] (or deserialization, which
/// goes through it), so a value of this type is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CurveParamsRepr", into = "CurveParamsRepr")]
pub struct CurveParams {
    curve_steepness: I256,
    adjustment_speed: I256,
    target_utilization: I256,
    initial_rate_at_target: I256,
    below_target_coefficient: I256,
    above_target_coefficient: I256,
}

impl CurveParams {
    /// Validates and builds a set of curve constants.
    ///
    /// # Errors
    ///
    /// - [`IrmError::DivisionByZero`] if `curve_steepness` is zero
    /// - [`IrmError::InvalidCurveParams`] if any value is outside its range:
    ///   steepness in `(1, 100]`, adjustment speed in
    ///   `[0, MAX_ADJUSTMENT_SPEED]`, target utilization in `(0, 1)`, initial
    ///   rate at target zero or in `[MIN_RATE_AT_TARGET, MAX_RATE_AT_TARGET]`
    pub fn new(
        curve_steepness: I256,
        adjustment_speed: I256,
        target_utilization: I256,
        initial_rate_at_target: I256,
    ) -> Result<Self> {
        let inverse_steepness = w_div(WAD_INT, curve_steepness)?;

        if curve_steepness <= WAD_INT {
            return Err(invalid("curve steepness must exceed 1"));
        }
        if curve_steepness > MAX_CURVE_STEEPNESS {
            return Err(invalid("curve steepness must not exceed 100"));
        }
        if adjustment_speed.is_negative() {
            return Err(invalid("adjustment speed must not be negative"));
        }
        if adjustment_speed > MAX_ADJUSTMENT_SPEED {
            return Err(invalid("adjustment speed must not exceed 1000 per year"));
        }
        if !target_utilization.is_positive() || target_utilization >= WAD_INT {
            return Err(invalid("target utilization must be strictly between 0 and 1"));
        }
        if !is_valid_rate_at_target(initial_rate_at_target) {
            return Err(invalid(
                "initial rate at target must be zero or within the rate at target bounds",
            ));
        }

        Ok(Self {
            curve_steepness,
            adjustment_speed,
            target_utilization,
            initial_rate_at_target,
            below_target_coefficient: checked_sub(WAD_INT, inverse_steepness)?,
            above_target_coefficient: checked_sub(curve_steepness, WAD_INT)?,
        })
    }

    pub fn curve_steepness(&self) -> I256 {
        self.curve_steepness
    }

    pub fn adjustment_speed(&self) -> I256 {
        self.adjustment_speed
    }

    pub fn target_utilization(&self) -> I256 {
        self.target_utilization
    }

    pub fn initial_rate_at_target(&self) -> I256 {
        self.initial_rate_at_target
    }

    /// Normalized distance from target utilization, in `[-1, 1]` WAD for
    /// utilizations in `[0, 1]`.
    pub fn error(&self, utilization: I256) -> Result<I256> {
        let err_norm_factor = if utilization > self.target_utilization {
            checked_sub(WAD_INT, self.target_utilization)?
        } else {
            self.target_utilization
        };
        w_div(checked_sub(utilization, self.target_utilization)?, err_norm_factor)
    }

    /// Applies the curve to `rate_at_target` for a normalized error.
    ///
    /// `curve(r, 0) == r` exactly.
    pub fn curve(&self, rate_at_target: I256, err: I256) -> Result<I256> {
        let coefficient = if err.is_negative() {
            self.below_target_coefficient
        } else {
            self.above_target_coefficient
        };
        let factor = checked_add(w_mul(coefficient, err)?, WAD_INT)?;
        w_mul(factor, rate_at_target)
    }
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            curve_steepness: DEFAULT_CURVE_STEEPNESS,
            adjustment_speed: DEFAULT_ADJUSTMENT_SPEED,
            target_utilization: DEFAULT_TARGET_UTILIZATION,
            initial_rate_at_target: DEFAULT_INITIAL_RATE_AT_TARGET,
            below_target_coefficient: int(750_000_000_000_000_000),
            above_target_coefficient: int(3_000_000_000_000_000_000),
        }
    }
}

fn invalid(reason: &str) -> IrmError {
    IrmError::InvalidCurveParams {
        reason: reason.to_string(),
    }
}

/// Wire form of [`CurveParams`]: WAD integers as decimal (or `0x` hex) strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveParamsRepr {
    pub curve_steepness: String,
    pub adjustment_speed: String,
    pub target_utilization: String,
    pub initial_rate_at_target: String,
}

impl TryFrom<CurveParamsRepr> for CurveParams {
    type Error = IrmError;

    fn try_from(repr: CurveParamsRepr) -> Result<Self> {
        Self::new(
            parse_i256(&repr.curve_steepness)?,
            parse_i256(&repr.adjustment_speed)?,
            parse_i256(&repr.target_utilization)?,
            parse_i256(&repr.initial_rate_at_target)?,
        )
    }
}

impl From<CurveParams> for CurveParamsRepr {
    fn from(params: CurveParams) -> Self {
        Self {
            curve_steepness: params.curve_steepness.to_string(),
            adjustment_speed: params.adjustment_speed.to_string(),
            target_utilization: params.target_utilization.to_string(),
            initial_rate_at_target: params.initial_rate_at_target.to_string(),
        }
    }
}

/// Result of borrow rate calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BorrowRateResult {
    /// Average borrow rate over the period (WAD-scaled per second)
    pub avg_borrow_rate: U256,
    /// End borrow rate (instantaneous rate at end of period)
    pub end_borrow_rate: U256,
    /// New rate at target after the period
    pub end_rate_at_target: I256,
}

/// Utilization of a market (WAD-scaled), zero when nothing is supplied.
pub fn utilization(total_supply_assets: U256, total_borrow_assets: U256) -> Result<I256> {
    if total_supply_assets.is_zero() {
        return Ok(I256::ZERO);
    }
    w_div(to_int(total_borrow_assets)?, to_int(total_supply_assets)?)
}

/// `rate_at_target * e^linear_adaptation`, clamped to the rate at target bounds.
pub fn new_rate_at_target(start_rate_at_target: I256, linear_adaptation: I256) -> Result<I256> {
    let rate = w_mul(start_rate_at_target, w_exp(linear_adaptation)?)?;
    Ok(rate.clamp(MIN_RATE_AT_TARGET, MAX_RATE_AT_TARGET))
}

/// Whether `rate` can be held as a market's rate at target: zero for an
/// unseeded market, otherwise within `[MIN_RATE_AT_TARGET, MAX_RATE_AT_TARGET]`.
pub fn is_valid_rate_at_target(rate: I256) -> bool {
    rate.is_zero() || (MIN_RATE_AT_TARGET..=MAX_RATE_AT_TARGET).contains(&rate)
}

fn bounded_rate(rate: I256) -> Result<U256> {
    to_uint(rate.clamp(MIN_RATE, MAX_RATE))
}

/// Calculates the borrow rate for the Adaptive Curve IRM.
///
/// This is the core IRM function that computes both the borrow rate for the
/// elapsed period and the adapted `rate_at_target` at its end.
///
/// # Arguments
///
/// * `curve` - The market's curve constants
/// * `utilization` - Current market utilization (WAD-scaled, 0 to 1e18)
/// * `rate_at_target` - Current rate at target utilization (per-second, WAD-scaled).
///   Zero marks a market that was never seeded: the initial rate at target is
///   used and no adaptation is applied.
/// * `elapsed` - Time since last update in seconds
///
/// # Returns
///
/// A [`BorrowRateResult`] containing:
/// - `avg_borrow_rate`: Average borrow rate over the elapsed period (for interest accrual)
/// - `end_borrow_rate`: Instantaneous rate at the end (current rate)
/// - `end_rate_at_target`: Updated rate at target after adaptation
///
/// The average is the unclamped mean `rate_at_target * (e^L - 1) / L`
/// clamped to the rate at target bounds. If the path reaches a bound during
/// the period, it is an upper bound of the clamped path's true mean when
/// rising and a lower bound when falling. `rate_at_target` must be zero or
/// satisfy [`is_valid_rate_at_target`].
///
/// # Errors
///
/// [`IrmError::Overflow`] if an intermediate value leaves the I256 range.
pub fn get_borrow_rate(
    curve: &CurveParams,
    utilization: I256,
    rate_at_target: I256,
    elapsed: u64,
) -> Result<BorrowRateResult> {
    let err = curve.error(utilization)?;

    let (avg_rate_at_target, end_rate_at_target) = if rate_at_target.is_zero() {
        // First interaction
        (curve.initial_rate_at_target, curve.initial_rate_at_target)
    } else {
        let speed = w_mul(curve.adjustment_speed, err)?;
        let linear_adaptation = speed
            .checked_mul(int(i128::from(elapsed)))
            .ok_or(IrmError::Overflow)?;

        tracing::trace!(%utilization, %err, %linear_adaptation, "adapting rate at target");

        if linear_adaptation.is_zero() {
            (rate_at_target, rate_at_target)
        } else {
            let end_rate = new_rate_at_target(rate_at_target, linear_adaptation)?;
            // The clamped path never leaves the bounds, so neither does its mean
            let avg_rate = w_mul(rate_at_target, w_exp_rel(linear_adaptation)?)?
                .clamp(MIN_RATE_AT_TARGET, MAX_RATE_AT_TARGET);
            (avg_rate, end_rate)
        }
    };

    Ok(BorrowRateResult {
        avg_borrow_rate: bounded_rate(curve.curve(avg_rate_at_target, err)?)?,
        end_borrow_rate: bounded_rate(curve.curve(end_rate_at_target, err)?)?,
        end_rate_at_target,
    })
}

/// Calculate the utilization that would produce a given borrow rate.
///
/// This is the inverse of the borrow rate curve function.
///
/// # Arguments
/// * `borrow_rate` - Target borrow rate (WAD-scaled per second)
/// * `rate_at_target` - Rate at target utilization (WAD-scaled per second)
///
/// # Returns
/// The utilization (WAD-scaled) that produces the given borrow rate, clamped to [0, WAD]
pub fn utilization_at_borrow_rate(
    curve: &CurveParams,
    borrow_rate: U256,
    rate_at_target: I256,
) -> Result<I256> {
    if rate_at_target.is_zero() {
        return Ok(curve.target_utilization);
    }

    let rate_ratio = w_div(to_int(borrow_rate)?, rate_at_target)?;

    if rate_ratio >= WAD_INT {
        // rate_ratio = 1 + (steepness - 1) * err
        let err = w_div(checked_sub(rate_ratio, WAD_INT)?, curve.above_target_coefficient)?;
        let err_denorm = w_mul(err, checked_sub(WAD_INT, curve.target_utilization)?)?;
        Ok(checked_add(curve.target_utilization, err_denorm)?.min(WAD_INT))
    } else {
        // rate_ratio = 1 - (1 - 1 / steepness) * |err|
        let err = w_div_up(checked_sub(WAD_INT, rate_ratio)?, curve.below_target_coefficient)?;
        let err_denorm = w_mul(err, curve.target_utilization)?;
        Ok(checked_sub(curve.target_utilization, err_denorm)?.max(I256::ZERO))
    }
}

/// Supply change needed to move a market to a given borrow rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SupplyAdjustment {
    /// This many assets must be supplied
    Supply(U256),
    /// This many assets can be withdrawn
    Withdraw(U256),
    /// No amount of supply reaches the rate (it needs zero utilization while
    /// assets are borrowed)
    Unreachable,
}

/// Calculate the supply/withdraw amount needed to reach a target borrow rate.
///
/// # Arguments
/// * `total_supply_assets` - Current total supply
/// * `total_borrow_assets` - Current total borrow
/// * `target_borrow_rate` - Target borrow rate
/// * `rate_at_target` - Current rate at target utilization
pub fn supply_for_borrow_rate(
    curve: &CurveParams,
    total_supply_assets: U256,
    total_borrow_assets: U256,
    target_borrow_rate: U256,
    rate_at_target: I256,
) -> Result<SupplyAdjustment> {
    let target_utilization = utilization_at_borrow_rate(curve, target_borrow_rate, rate_at_target)?;

    if target_utilization.is_zero() {
        if total_borrow_assets.is_zero() {
            return Ok(SupplyAdjustment::Withdraw(total_supply_assets));
        }
        return Ok(SupplyAdjustment::Unreachable);
    }

    // Required supply = total_borrow / target_utilization
    let required_supply = to_uint(w_div_up(to_int(total_borrow_assets)?, target_utilization)?)?;

    if required_supply > total_supply_assets {
        Ok(SupplyAdjustment::Supply(required_supply - total_supply_assets))
    } else {
        Ok(SupplyAdjustment::Withdraw(total_supply_assets - required_supply))
    }
}
