//! Fixed-point math kernel.
//!
//! All values are WAD-scaled signed 256-bit integers: the integer `v`
//! represents the real number `v / 1e18`. Products and quotients truncate
//! toward zero and every intermediate step is checked, so an out-of-range
//! input surfaces as [`IrmError::Overflow`] instead of wrapping.
//!
//! # Exponential
//!
//! [`w_exp`] decomposes `x = q * ln(2) + r` with `|r| <= ln(2) / 2`, sums the
//! Taylor series of `e^r` at 1e36 precision until the next term truncates to
//! zero and shifts the result by `q` bits. Its absolute error stays within
//! `1e-9 * e^x + 2 wei` over the whole domain `[LN_WEI_INT, WEXP_UPPER_BOUND]`.
//!
//! ```rust
//! use adaptive_irm::math::{int, w_exp, LN_2_INT, WAD_INT};
//!
//! // e^(ln 2) = 2
//! assert_eq!(w_exp(LN_2_INT).unwrap(), WAD_INT * int(2));
//! ```

use alloy_primitives::{I256, U256};

use crate::error::{IrmError, Result};

/// Seconds in a year (365 days)
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// WAD (1e18) for fixed-point math
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// WAD as a signed integer
pub const WAD_INT: I256 = I256::from_raw(WAD);

/// ln(2) scaled by WAD
pub const LN_2_INT: I256 = int(693_147_180_559_945_309);

/// ln(2) / 2 scaled by WAD, the bound on the reduced exponent
pub const HALF_LN_2_INT: I256 = int(346_573_590_279_972_654);

/// ln(1e-18) scaled by WAD. Below this `e^x` rounds to zero.
pub const LN_WEI_INT: I256 = int(-41_446_531_673_892_822_312);

/// ln(I256::MAX / 1e36) scaled by WAD. `w_exp` saturates from here on, which
/// keeps `w_exp(x) * WAD` representable.
pub const WEXP_UPPER_BOUND: I256 = int(93_859_467_695_000_404_319);

/// Hard cap on Taylor terms. The series converges well before this on the
/// reduced domain.
const MAX_SERIES_TERMS: i128 = 48;

/// Extended scale (1e36) the series is summed at before truncating to WAD.
const SERIES_SCALE: I256 = int(1_000_000_000_000_000_000_000_000_000_000_000_000);

/// Lifts a signed 128-bit value into the 256-bit domain.
pub const fn int(value: i128) -> I256 {
    let magnitude = value.unsigned_abs();
    let raw = if value < 0 {
        let low = magnitude.wrapping_neg();
        U256::from_limbs([low as u64, (low >> 64) as u64, u64::MAX, u64::MAX])
    } else {
        U256::from_limbs([magnitude as u64, (magnitude >> 64) as u64, 0, 0])
    };
    I256::from_raw(raw)
}

/// Converts an unsigned value into the signed domain.
pub fn to_int(value: U256) -> Result<I256> {
    if value > I256::MAX.into_raw() {
        return Err(IrmError::Overflow);
    }
    Ok(I256::from_raw(value))
}

/// Converts a non-negative signed value back into the unsigned domain.
pub fn to_uint(value: I256) -> Result<U256> {
    if value.is_negative() {
        return Err(IrmError::Overflow);
    }
    Ok(value.into_raw())
}

/// Returns `a * b / d`, rounded toward zero.
pub fn mul_div(a: I256, b: I256, d: I256) -> Result<I256> {
    if d.is_zero() {
        return Err(IrmError::DivisionByZero);
    }
    a.checked_mul(b)
        .ok_or(IrmError::Overflow)?
        .checked_div(d)
        .ok_or(IrmError::Overflow)
}

/// Returns `a * b / WAD`, rounded toward zero.
pub fn w_mul(a: I256, b: I256) -> Result<I256> {
    mul_div(a, b, WAD_INT)
}

/// Returns `a * WAD / b`, rounded toward zero.
pub fn w_div(a: I256, b: I256) -> Result<I256> {
    mul_div(a, WAD_INT, b)
}

/// Returns `a * WAD / b` for non-negative operands, rounded up.
pub fn w_div_up(a: I256, b: I256) -> Result<I256> {
    if b.is_zero() {
        return Err(IrmError::DivisionByZero);
    }
    let numerator = a.checked_mul(WAD_INT).ok_or(IrmError::Overflow)?;
    let quotient = numerator.checked_div(b).ok_or(IrmError::Overflow)?;
    if quotient.checked_mul(b) == Some(numerator) {
        Ok(quotient)
    } else {
        checked_add(quotient, I256::ONE)
    }
}

pub(crate) fn checked_add(a: I256, b: I256) -> Result<I256> {
    a.checked_add(b).ok_or(IrmError::Overflow)
}

pub(crate) fn checked_sub(a: I256, b: I256) -> Result<I256> {
    a.checked_sub(b).ok_or(IrmError::Overflow)
}

/// Sums `Σ x^k * offset! / (k + offset)!` for a WAD-scaled `x`.
///
/// `offset = 0` gives `e^x`, `offset = 1` gives `(e^x - 1) / x`. Terms are
/// carried at [`SERIES_SCALE`] so the only WAD truncation is the final one.
fn taylor(x: I256, offset: i128) -> Result<I256> {
    let x = x.checked_mul(WAD_INT).ok_or(IrmError::Overflow)?;
    let mut term = SERIES_SCALE;
    let mut sum = SERIES_SCALE;
    for k in 1..=MAX_SERIES_TERMS {
        let divisor = SERIES_SCALE
            .checked_mul(int(k + offset))
            .ok_or(IrmError::Overflow)?;
        term = mul_div(term, x, divisor)?;
        if term.is_zero() {
            break;
        }
        sum = checked_add(sum, term)?;
    }
    sum.checked_div(WAD_INT).ok_or(IrmError::Overflow)
}

/// Approximation of `e^x` for a WAD-scaled `x`.
///
/// Returns zero below [`LN_WEI_INT`] and saturates at
/// `w_exp(WEXP_UPPER_BOUND)` above [`WEXP_UPPER_BOUND`].
pub fn w_exp(x: I256) -> Result<I256> {
    // If x < ln(1e-18) then exp(x) < 1e-18 so it is rounded to zero
    if x < LN_WEI_INT {
        return Ok(I256::ZERO);
    }
    let x = x.min(WEXP_UPPER_BOUND);

    // Decompose x as x = q * ln(2) + r, q rounded half toward zero
    let rounding_adjustment = if x.is_negative() {
        int(-346_573_590_279_972_654)
    } else {
        HALF_LN_2_INT
    };
    let q = checked_add(x, rounding_adjustment)?
        .checked_div(LN_2_INT)
        .ok_or(IrmError::Overflow)?;
    let r = checked_sub(x, q.checked_mul(LN_2_INT).ok_or(IrmError::Overflow)?)?;

    let exp_r = to_uint(taylor(r, 0)?)?;

    // e^x = 2^q * e^r
    let shift = q.unsigned_abs().saturating_to::<usize>();
    let scaled = if q.is_negative() {
        exp_r >> shift
    } else {
        exp_r << shift
    };
    to_int(scaled)
}

/// Approximation of `(e^x - 1) / x` for a WAD-scaled `x`, with the limit
/// value of one WAD at zero.
///
/// Close to zero the quotient is summed as its own series so that no
/// precision is lost to the cancellation in `e^x - 1`.
pub fn w_exp_rel(x: I256) -> Result<I256> {
    if x.unsigned_abs() <= HALF_LN_2_INT.into_raw() {
        return taylor(x, 1);
    }
    let growth = checked_sub(w_exp(x)?, WAD_INT)?;
    w_div(growth, x)
}

/// Parses a decimal or `0x`-prefixed hexadecimal unsigned integer.
pub fn parse_u256(input: &str) -> Result<U256> {
    let trimmed = input.trim();
    let parsed = match trimmed.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str_radix(trimmed, 10),
    };
    parsed.map_err(|_| IrmError::InvalidNumber {
        input: input.to_string(),
    })
}

/// Parses an optionally negative integer, see [`parse_u256`].
pub fn parse_i256(input: &str) -> Result<I256> {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, trimmed),
    };
    let magnitude = to_int(parse_u256(digits)?).map_err(|_| IrmError::InvalidNumber {
        input: input.to_string(),
    })?;
    if negative {
        magnitude.checked_neg().ok_or(IrmError::Overflow)
    } else {
        Ok(magnitude)
    }
}

/// Converts an annual WAD rate into a per-second rate, rounding down.
pub fn annual_to_per_second(annual: U256) -> U256 {
    annual / U256::from(SECONDS_PER_YEAR)
}

/// Converts a WAD-scaled value to f64 (lossy, for display)
pub fn wad_to_f64(value: U256) -> f64 {
    let raw = value
        .as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, &limb| acc * 18_446_744_073_709_551_616.0 + limb as f64);
    raw / 1e18
}

/// Signed counterpart of [`wad_to_f64`]
pub fn int_to_f64(value: I256) -> f64 {
    let magnitude = wad_to_f64(value.unsigned_abs());
    if value.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Converts a per-second rate to an APR
pub fn rate_to_apr(rate: U256) -> f64 {
    wad_to_f64(rate) * SECONDS_PER_YEAR as f64
}

/// Converts a per-second rate to a continuously compounded APY
pub fn rate_to_apy(rate: U256) -> f64 {
    rate_to_apr(rate).exp_m1()
}
