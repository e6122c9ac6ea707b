//! Market conventions for the normal model.
//!
//! Moneyness under the normal model is an absolute distance `F − K`, not a
//! ratio, which is what lets it handle zero and negative forwards.

use crate::types::OptionType;

/// Signed moneyness `ω(F − K)`: positive when the option is in the money.
pub fn normal_moneyness(forward: f64, strike: f64, option_type: OptionType) -> f64 {
    option_type.sign() * (forward - strike)
}

/// Undiscounted intrinsic value `max(ω(F − K), 0)` against the forward.
pub fn intrinsic_value(forward: f64, strike: f64, option_type: OptionType) -> f64 {
    normal_moneyness(forward, strike, option_type).max(0.0)
}

/// Total standard deviation `s = σ·√T` of the forward at expiry.
pub fn total_std_dev(vol: f64, expiry: f64) -> f64 {
    vol * expiry.sqrt()
}
