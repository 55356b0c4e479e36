//! End-to-end accrual scenarios.

use adaptive_irm::math::{int, to_uint, w_exp, w_mul};
use adaptive_irm::{
    AdaptiveCurveIrm, CurveParams, IrmError, MarketState, MAX_RATE_AT_TARGET, MIN_RATE_AT_TARGET,
};
use alloy_primitives::{I256, U256};

use super::helpers::{market, state};

const ONE_DAY: u64 = 86_400;
const START: u64 = 1_700_000_000;

#[test]
fn test_at_target_rate_never_moves() {
    let irm = AdaptiveCurveIrm::new();
    let params = market(0);
    let r0 = params.curve.initial_rate_at_target();

    let mut last_update = 0;
    let mut now = START;
    for elapsed in [0, 1, ONE_DAY, 365 * ONE_DAY] {
        now += elapsed;
        let rate = irm.borrow_rate(&params, &state(90, last_update), now).unwrap();
        assert_eq!(rate, to_uint(r0).unwrap());
        assert_eq!(irm.rate_at_target(&params.id()), r0);
        last_update = now;
    }
}

#[test]
fn test_utilization_jump_from_zero_to_full() {
    let irm = AdaptiveCurveIrm::new();
    let params = market(1);
    let r0 = params.curve.initial_rate_at_target();

    // Seed while empty
    irm.borrow_rate(&params, &state(0, 0), START).unwrap();
    assert_eq!(irm.rate_at_target(&params.id()), r0);

    let elapsed = 3 * ONE_DAY;
    irm.borrow_rate(&params, &state(100, START), START + elapsed)
        .unwrap();

    let speed = params.curve.adjustment_speed();
    let expected = w_mul(r0, w_exp(speed * int(i128::from(elapsed))).unwrap())
        .unwrap()
        .clamp(MIN_RATE_AT_TARGET, MAX_RATE_AT_TARGET);
    assert_eq!(irm.rate_at_target(&params.id()), expected);
}

#[test]
fn test_zero_elapsed_is_idempotent() {
    let irm = AdaptiveCurveIrm::new();
    let params = market(2);
    irm.borrow_rate(&params, &state(100, 0), START).unwrap();
    irm.borrow_rate(&params, &state(100, START), START + ONE_DAY)
        .unwrap();
    let adapted = irm.rate_at_target(&params.id());

    for borrowed in [0, 45, 90, 100] {
        let now = START + ONE_DAY;
        irm.borrow_rate(&params, &state(borrowed, now), now).unwrap();
        assert_eq!(irm.rate_at_target(&params.id()), adapted);
    }
}

#[test]
fn test_long_idle_market_saturates() {
    let irm = AdaptiveCurveIrm::new();
    let params = market(3);
    irm.borrow_rate(&params, &state(100, 0), START).unwrap();

    let ten_years = 10 * 365 * ONE_DAY;
    let rate = irm
        .borrow_rate(&params, &state(100, START), START + ten_years)
        .unwrap();
    assert_eq!(irm.rate_at_target(&params.id()), MAX_RATE_AT_TARGET);
    // Steepness 4 on the capped rate at target stays below the rate ceiling
    assert!(rate <= to_uint(MAX_RATE_AT_TARGET * int(4)).unwrap());

    irm.borrow_rate(&params, &state(0, START + ten_years), START + 2 * ten_years)
        .unwrap();
    assert_eq!(irm.rate_at_target(&params.id()), MIN_RATE_AT_TARGET);
}

#[test]
fn test_rate_rises_above_target_and_falls_below() {
    let irm = AdaptiveCurveIrm::new();
    let params = market(4);
    irm.borrow_rate(&params, &state(90, 0), START).unwrap();
    let r0 = irm.rate_at_target(&params.id());

    let busy = irm
        .borrow_rate(&params, &state(99, START), START + ONE_DAY)
        .unwrap();
    let r1 = irm.rate_at_target(&params.id());
    assert!(r1 > r0);

    let idle = irm
        .borrow_rate(&params, &state(20, START + ONE_DAY), START + 2 * ONE_DAY)
        .unwrap();
    assert!(irm.rate_at_target(&params.id()) < r1);
    assert!(idle < busy);
}

#[test]
fn test_preview_sequence_leaves_store_empty() {
    let irm = AdaptiveCurveIrm::new();
    let params = market(5);
    let first = irm.borrow_rate_view(&params, &state(60, 0), START).unwrap();
    let second = irm
        .borrow_rate_view(&params, &state(60, START), START + ONE_DAY)
        .unwrap();
    // Nothing was seeded, so both previews are first calls
    assert_eq!(first, second);
    assert_eq!(irm.rate_at_target(&params.id()), I256::ZERO);
}

#[test]
fn test_invalid_timestamp_after_seeding() {
    let irm = AdaptiveCurveIrm::new();
    let params = market(6);
    irm.borrow_rate(&params, &state(50, 0), START).unwrap();

    let err = irm
        .borrow_rate(&params, &state(50, START), START - 1)
        .unwrap_err();
    assert_eq!(
        err,
        IrmError::InvalidTimestamp {
            now: START - 1,
            last_update: START
        }
    );
}

#[test]
fn test_empty_market_never_divides_by_zero() {
    let irm = AdaptiveCurveIrm::new();
    let params = market(7);
    let empty = MarketState {
        total_supply_assets: U256::ZERO,
        total_borrow_assets: U256::ZERO,
        last_update: 0,
    };
    irm.borrow_rate(&params, &empty, START).unwrap();
    let rate = irm
        .borrow_rate(&params, &MarketState { last_update: START, ..empty }, START + ONE_DAY)
        .unwrap();
    assert!(rate > U256::ZERO);
    assert!(irm.rate_at_target(&params.id()) < params.curve.initial_rate_at_target());
}

#[test]
fn test_markets_with_other_curves_are_independent() {
    let irm = AdaptiveCurveIrm::new();
    let default_market = market(8);
    let mut steep_market = market(9);
    steep_market.curve = CurveParams::new(
        int(10_000_000_000_000_000_000),
        default_market.curve.adjustment_speed(),
        int(800_000_000_000_000_000),
        default_market.curve.initial_rate_at_target(),
    )
    .unwrap();

    let default_rate = irm.borrow_rate(&default_market, &state(100, 0), START).unwrap();
    let steep_rate = irm.borrow_rate(&steep_market, &state(100, 0), START).unwrap();
    assert_eq!(steep_rate, default_rate * U256::from(10) / U256::from(4));
    assert_eq!(irm.store().len(), 2);
}
