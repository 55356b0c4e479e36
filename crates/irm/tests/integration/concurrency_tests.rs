//! Accruals from many threads against one engine.

use std::thread;

use adaptive_irm::AdaptiveCurveIrm;

use super::helpers::{market, state};

const THREADS: u64 = 8;
const CALLS_PER_THREAD: u64 = 50;
const STEP: u64 = 3_600;

#[test]
fn test_same_market_updates_are_not_lost() {
    let params = market(100);
    // Every call is identical, so the result only depends on how many landed
    let busy = state(100, 0);

    let concurrent = AdaptiveCurveIrm::new();
    concurrent.borrow_rate(&params, &busy, 0).unwrap();
    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                for _ in 0..CALLS_PER_THREAD {
                    concurrent.borrow_rate(&params, &busy, STEP).unwrap();
                }
            });
        }
    });

    let serial = AdaptiveCurveIrm::new();
    serial.borrow_rate(&params, &busy, 0).unwrap();
    for _ in 0..THREADS * CALLS_PER_THREAD {
        serial.borrow_rate(&params, &busy, STEP).unwrap();
    }

    let id = params.id();
    assert!(serial.rate_at_target(&id) > params.curve.initial_rate_at_target());
    assert_eq!(concurrent.rate_at_target(&id), serial.rate_at_target(&id));
}

#[test]
fn test_disjoint_markets_match_serial_runs() {
    let concurrent = AdaptiveCurveIrm::new();
    thread::scope(|scope| {
        for seed in 0..THREADS {
            let irm = &concurrent;
            scope.spawn(move || run_timeline(irm, seed));
        }
    });

    let serial = AdaptiveCurveIrm::new();
    for seed in 0..THREADS {
        run_timeline(&serial, seed);
    }

    assert_eq!(concurrent.store().snapshot(), serial.store().snapshot());
    assert_eq!(concurrent.store().len(), THREADS as usize);
}

fn run_timeline(irm: &AdaptiveCurveIrm, seed: u64) {
    let params = market(seed);
    let mut last_update = 0;
    for step in 1..=CALLS_PER_THREAD {
        let borrowed = (seed * 13 + step * 7) % 101;
        let now = step * STEP;
        irm.borrow_rate(&params, &state(borrowed, last_update), now)
            .unwrap();
        last_update = now;
    }
}
