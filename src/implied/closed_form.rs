//! Closed-form inversion kernels for the normalized Bachelier time value.
//!
//! Both kernels work on the out-of-the-money time value `τ` and the absolute
//! moneyness `|F − K|`, and return the total standard deviation `s = σ√T`.
//! With `a = |F − K|/s` the time value is `τ = s·f(−a)` where
//! `f(d) = d·Φ(d) + φ(d)`.
//!
//! # References
//! - Jäckel, P. "Implied Normal Volatility" (2017)
//! - Le Floc'h, F. "Fast and Accurate Analytic Basis Point Volatility" (2016)

use crate::math::{norm_cdf, norm_pdf, INV_SQRT_2PI, SQRT_2PI};

/// Split point in `φ* = −τ/|F−K|` between the two rational forms.
const PHI_STAR_SPLIT: f64 = -0.001_882_039_271;

/// Normalized time value `f(d) = d·Φ(d) + φ(d)`, never negative.
///
/// Deep in the tail both terms are subnormal and their difference is noise.
pub(crate) fn normalized_time_value(d: f64) -> f64 {
    (d * norm_cdf(d) + norm_pdf(d)).max(0.0)
}

/// Total standard deviation away from the money.
///
/// Requires `time_value > 0` and `abs_moneyness > 0`. The result may be
/// non-finite when the normalized moneyness underflows the density; callers
/// check it.
pub(crate) fn away_from_atm_std_dev(time_value: f64, abs_moneyness: f64) -> f64 {
    let phi_star = -time_value / abs_moneyness;
    let x_bar = rational_guess(phi_star);
    let x_star = householder_step(x_bar, phi_star);
    abs_moneyness / x_star.abs()
}

/// Total standard deviation near the money.
///
/// Inverts the expansion of the straddle half-price in `ε = ((F−K)/y)²`:
/// `y = √(2π)·(τ + |F−K|/2) = s + (F−K)²/(2s) − (F−K)⁴/(24s³) + …`, truncated
/// after the `ε³` term.
pub(crate) fn near_atm_std_dev(time_value: f64, abs_moneyness: f64) -> f64 {
    let y = SQRT_2PI * (time_value + 0.5 * abs_moneyness);
    let r = abs_moneyness / y;
    let eps = r * r;
    y * (1.0 - eps * (0.5 + eps * (5.0 / 24.0 + eps * (41.0 / 240.0))))
}

/// Approximate normalized moneyness `x̄ ≈ −|F−K|/s` from `φ* ∈ (−∞, 0)`.
///
/// Relative accuracy is better than 1e-3 over the whole domain.
fn rational_guess(phi_star: f64) -> f64 {
    if phi_star < PHI_STAR_SPLIT {
        let g = 1.0 / (phi_star - 0.5);
        let g2 = g * g;
        let xi = (0.032_114_372_355
            - g2 * (0.016_969_777_977 - g2 * (2.620_733_246_1e-3 - 9.606_695_286_1e-5 * g2)))
            / (1.0 - g2 * (0.663_564_693_8 - g2 * (0.145_287_121_96 - 0.010_472_855_461 * g2)));
        g * (INV_SQRT_2PI + xi * g2)
    } else {
        let h = (-(-phi_star).ln()).sqrt();
        (9.488_340_977_9 - h * (9.632_090_363_5 - h * (0.585_569_973_23 + 2.146_409_335_1 * h)))
            / (1.0 - h * (0.651_748_208_67 + h * (1.512_024_782_8 + 6.643_784_713_2e-5 * h)))
    }
}

/// One third-order Householder correction of `x̄` against
/// `Φ(x) + φ(x)/x = φ*`.
fn householder_step(x_bar: f64, phi_star: f64) -> f64 {
    let pdf = norm_pdf(x_bar);
    let q = (norm_cdf(x_bar) + pdf / x_bar - phi_star) / pdf;
    let x2 = x_bar * x_bar;
    x_bar
        + 3.0 * q * x2 * (2.0 - q * x_bar * (2.0 + x2))
            / (6.0
                + q * x_bar
                    * (-12.0 + x_bar * (6.0 * q + x_bar * (-6.0 + q * x_bar * (3.0 + x2)))))
}
