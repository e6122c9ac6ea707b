//! Integration tests for normal-model pricing and implied volatility.
//!
//! Exercises the public API end to end: discounted pricing, inversion across
//! the strike range, the at-the-money limit, put-call consistency, the
//! arbitrage floor, and concurrent use of one shared calculator.

use std::sync::Arc;
use std::thread;

use approx::assert_abs_diff_eq;
use normvol::implied::{
    normal_greeks, normal_price, normal_price_discounted, ImpliedVolConfig, NormalImpliedVol,
    NormalQuote,
};
use normvol::{NormVolError, OptionType, Vol};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const FORWARD: f64 = 123.4;
const DISCOUNT_FACTOR: f64 = 0.95;
const EXPIRY: f64 = 3.25;
const TOLERANCE: f64 = 1e-7;

/// Ten normal vols from 5% to 41% of the forward.
fn test_vols() -> Vec<f64> {
    (0..10).map(|i| FORWARD * (0.05 + 0.04 * i as f64)).collect()
}

/// Eleven strikes from F − 50 to F + 50 in steps of 10.
fn test_strikes() -> Vec<f64> {
    (-5..=5).map(|j| FORWARD + 10.0 * j as f64).collect()
}

/// Strikes within a few rounding errors of the forward.
fn atm_strikes() -> Vec<f64> {
    [-3e-10, -1e-10, 0.0, 1e-10, 3e-10]
        .iter()
        .map(|d| FORWARD + d)
        .collect()
}

fn discounted(strike: f64, vol: f64, option_type: OptionType) -> f64 {
    normal_price_discounted(FORWARD, strike, vol, EXPIRY, DISCOUNT_FACTOR, option_type).unwrap()
}

fn assert_round_trip(strikes: &[f64], option_type: OptionType) {
    let solver = NormalImpliedVol::default();
    for vol in test_vols() {
        for &strike in strikes {
            let price = discounted(strike, vol, option_type);
            let implied = solver
                .implied_vol(price, FORWARD, strike, EXPIRY, DISCOUNT_FACTOR, option_type)
                .unwrap();
            assert_abs_diff_eq!(implied.0, vol, epsilon = TOLERANCE);
        }
    }
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

#[test]
fn call_round_trip_across_strikes() {
    assert_round_trip(&test_strikes(), OptionType::Call);
}

#[test]
fn put_round_trip_across_strikes() {
    assert_round_trip(&test_strikes(), OptionType::Put);
}

#[test]
fn call_round_trip_at_the_money() {
    assert_round_trip(&atm_strikes(), OptionType::Call);
}

#[test]
fn put_round_trip_at_the_money() {
    assert_round_trip(&atm_strikes(), OptionType::Put);
}

#[test]
fn undiscounted_compute_matches_unit_discount_factor() {
    let solver = NormalImpliedVol::default();
    for &strike in &test_strikes() {
        let price = normal_price(FORWARD, strike, 15.0, EXPIRY, OptionType::Call).unwrap();
        let a = NormalImpliedVol::compute(price, FORWARD, strike, EXPIRY, OptionType::Call).unwrap();
        let b = solver
            .implied_vol(price, FORWARD, strike, EXPIRY, 1.0, OptionType::Call)
            .unwrap();
        assert_eq!(a, b);
    }
}

// ---------------------------------------------------------------------------
// Put-call consistency
// ---------------------------------------------------------------------------

#[test]
fn parity_equivalent_put_gives_same_vol() {
    let solver = NormalImpliedVol::default();
    let strikes: Vec<f64> = test_strikes().into_iter().chain(atm_strikes()).collect();
    for vol in test_vols() {
        for &strike in &strikes {
            let call = discounted(strike, vol, OptionType::Call);
            let put = call - DISCOUNT_FACTOR * (FORWARD - strike);
            let from_call = solver
                .implied_vol(call, FORWARD, strike, EXPIRY, DISCOUNT_FACTOR, OptionType::Call)
                .unwrap();
            let from_put = solver
                .implied_vol(put, FORWARD, strike, EXPIRY, DISCOUNT_FACTOR, OptionType::Put)
                .unwrap();
            assert_abs_diff_eq!(from_call.0, from_put.0, epsilon = TOLERANCE);
        }
    }
}

// ---------------------------------------------------------------------------
// Arbitrage floor
// ---------------------------------------------------------------------------

#[test]
fn price_below_intrinsic_is_rejected_for_call_and_put() {
    let solver = NormalImpliedVol::default();
    let forward = 100.0;
    let cases = [(forward - 1.0, OptionType::Call), (forward + 1.0, OptionType::Put)];
    for (strike, option_type) in cases {
        let intrinsic = (option_type.sign() * (forward - strike)).max(0.0);
        assert_eq!(intrinsic, 1.0);
        let price = 0.9 * DISCOUNT_FACTOR * intrinsic;
        let err = solver
            .implied_vol(price, forward, strike, EXPIRY, DISCOUNT_FACTOR, option_type)
            .unwrap_err();
        assert!(
            matches!(err, NormVolError::ArbitrageViolation { .. }),
            "{option_type:?}: expected ArbitrageViolation, got {err}"
        );
    }
}

#[test]
fn discount_factor_is_applied_before_the_floor_check() {
    // 0.96 discounted is above intrinsic 1.0 only once undiscounted by 0.95.
    let solver = NormalImpliedVol::default();
    let vol = solver
        .implied_vol(0.96, 100.0, 99.0, 1.0, 0.95, OptionType::Call)
        .unwrap();
    assert!(vol.0 > 0.0);
    let err = solver
        .implied_vol(0.94, 100.0, 99.0, 1.0, 0.95, OptionType::Call)
        .unwrap_err();
    assert!(matches!(err, NormVolError::ArbitrageViolation { .. }));
}

// ---------------------------------------------------------------------------
// Forward pricing
// ---------------------------------------------------------------------------

#[test]
fn zero_vol_price_is_discounted_intrinsic() {
    for &strike in &test_strikes() {
        for expiry in [0.01, 1.0, EXPIRY, 30.0] {
            let price =
                normal_price_discounted(FORWARD, strike, 0.0, expiry, DISCOUNT_FACTOR, OptionType::Call)
                    .unwrap();
            let expected = DISCOUNT_FACTOR * (FORWARD - strike).max(0.0);
            assert_abs_diff_eq!(price, expected, epsilon = 1e-13);
        }
    }
}

#[test]
fn price_is_strictly_increasing_in_vol() {
    for &strike in &test_strikes() {
        for option_type in [OptionType::Call, OptionType::Put] {
            // Below ~5 the deep in-the-money time value drops under one ulp of intrinsic.
            let mut previous = normal_price(FORWARD, strike, 5.0, EXPIRY, option_type).unwrap();
            for i in 21..=400 {
                let vol = 0.25 * i as f64;
                let price = normal_price(FORWARD, strike, vol, EXPIRY, option_type).unwrap();
                assert!(
                    price > previous,
                    "K={strike}, vol={vol}: {price} <= {previous}"
                );
                previous = price;
            }
        }
    }
}

#[test]
fn vega_is_positive_and_matches_price_slope() {
    let g = normal_greeks(FORWARD, FORWARD + 20.0, 30.0, EXPIRY, OptionType::Put).unwrap();
    assert!(g.vega > 0.0);
    let up = normal_price(FORWARD, FORWARD + 20.0, 30.0 + 1e-5, EXPIRY, OptionType::Put).unwrap();
    let dn = normal_price(FORWARD, FORWARD + 20.0, 30.0 - 1e-5, EXPIRY, OptionType::Put).unwrap();
    assert_abs_diff_eq!(g.vega, (up - dn) / 2e-5, epsilon = 1e-6);
}

// ---------------------------------------------------------------------------
// Negative rates
// ---------------------------------------------------------------------------

#[test]
fn negative_forward_and_strike_round_trip() {
    let (forward, strike, vol, expiry, df) = (-0.0035, -0.0010, 0.0042, 2.5, 1.004);
    for option_type in [OptionType::Call, OptionType::Put] {
        let price = normal_price_discounted(forward, strike, vol, expiry, df, option_type).unwrap();
        let implied = NormalImpliedVol::default()
            .implied_vol(price, forward, strike, expiry, df, option_type)
            .unwrap();
        assert_abs_diff_eq!(implied.0, vol, epsilon = 1e-12);
    }
}

// ---------------------------------------------------------------------------
// Configuration and concurrency
// ---------------------------------------------------------------------------

#[test]
fn threshold_choice_does_not_move_the_answer() {
    let loose = NormalImpliedVol::new(ImpliedVolConfig::new(0.1, 1e-12).unwrap());
    let tight = NormalImpliedVol::new(ImpliedVolConfig::new(1e-4, 1e-12).unwrap());
    for vol in test_vols() {
        for offset in [1e-6, 1e-3, 0.05, 0.5, 2.0] {
            let strike = FORWARD + offset;
            let price = discounted(strike, vol, OptionType::Call);
            let a = loose
                .implied_vol(price, FORWARD, strike, EXPIRY, DISCOUNT_FACTOR, OptionType::Call)
                .unwrap();
            let b = tight
                .implied_vol(price, FORWARD, strike, EXPIRY, DISCOUNT_FACTOR, OptionType::Call)
                .unwrap();
            assert_abs_diff_eq!(a.0, b.0, epsilon = TOLERANCE);
        }
    }
}

#[test]
fn shared_calculator_across_threads() {
    let solver = Arc::new(NormalImpliedVol::default());
    let handles: Vec<_> = test_vols()
        .into_iter()
        .map(|vol| {
            let solver = Arc::clone(&solver);
            thread::spawn(move || {
                test_strikes()
                    .into_iter()
                    .map(|strike| {
                        let price = discounted(strike, vol, OptionType::Put);
                        solver
                            .implied_vol(price, FORWARD, strike, EXPIRY, DISCOUNT_FACTOR, OptionType::Put)
                            .map(|v| (v, vol))
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for result in handle.join().unwrap() {
            let (implied, vol) = result.unwrap();
            assert_abs_diff_eq!(implied.0, vol, epsilon = TOLERANCE);
        }
    }
}

#[test]
fn batch_matches_single_quote_inversion() {
    let solver = NormalImpliedVol::default();
    let quotes: Vec<NormalQuote> = test_vols()
        .into_iter()
        .flat_map(|vol| {
            test_strikes().into_iter().map(move |strike| NormalQuote {
                option_price: discounted(strike, vol, OptionType::Call),
                forward: FORWARD,
                strike,
                expiry: EXPIRY,
                discount_factor: DISCOUNT_FACTOR,
                option_type: OptionType::Call,
            })
        })
        .collect();

    let batch = solver.implied_vols(&quotes);
    for (q, v) in quotes.iter().zip(batch) {
        let single: Vol = solver
            .implied_vol(q.option_price, q.forward, q.strike, q.expiry, q.discount_factor, q.option_type)
            .unwrap();
        assert_eq!(v.unwrap(), single);
    }
}
