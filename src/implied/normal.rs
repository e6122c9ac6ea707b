//! Bachelier (normal) pricing and implied volatility.
//!
//! Used in markets where the normal model is standard (rates, short-dated FX),
//! in particular wherever forwards can be zero or negative.
//!
//! # Formula
//! ```text
//! V(F, K, T, σ) = s·[d·Φ(d) + φ(d)]
//! where s = σ√T, d = ω(F − K)/s, ω = +1 (call) / −1 (put)
//! ```

use crate::conventions::{normal_moneyness, total_std_dev};
use crate::error::{self, NormVolError};
use crate::implied::closed_form::{away_from_atm_std_dev, near_atm_std_dev, normalized_time_value};
use crate::implied::config::ImpliedVolConfig;
use crate::math::{norm_cdf, norm_pdf};
use crate::types::{NormalGreeks, OptionType, Vol};
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Undiscounted normal-model option price.
///
/// # Arguments
/// * `forward` — Forward price at expiry (any finite value)
/// * `strike` — Strike price (any finite value)
/// * `vol` — Normal volatility in price units (must be ≥ 0)
/// * `expiry` — Time to expiry in years (must be > 0)
/// * `option_type` — Call or Put
///
/// A zero volatility returns the intrinsic value `max(ω(F − K), 0)`.
///
/// # Errors
/// Returns [`NormVolError::InvalidInput`] for non-finite inputs, negative
/// volatility or non-positive expiry.
///
/// # Examples
/// ```
/// use normvol::implied::normal_price;
/// use normvol::OptionType;
///
/// // ATM: V = σ√T/√(2π)
/// let v = normal_price(100.0, 100.0, 20.0, 1.0, OptionType::Call).unwrap();
/// assert!((v - 7.978_845_608_028_654).abs() < 1e-12);
/// ```
pub fn normal_price(
    forward: f64,
    strike: f64,
    vol: f64,
    expiry: f64,
    option_type: OptionType,
) -> error::Result<f64> {
    validate_finite(forward, "forward")?;
    validate_finite(strike, "strike")?;
    validate_non_negative(vol, "vol")?;
    validate_positive(expiry, "expiry")?;

    let moneyness = normal_moneyness(forward, strike, option_type);
    Ok(bachelier_value(moneyness, total_std_dev(vol, expiry)))
}

/// Discounted normal-model option price `DF · V(F, K, T, σ)`.
///
/// # Errors
/// As [`normal_price`], plus [`NormVolError::InvalidInput`] for a
/// non-positive or non-finite `discount_factor`.
pub fn normal_price_discounted(
    forward: f64,
    strike: f64,
    vol: f64,
    expiry: f64,
    discount_factor: f64,
    option_type: OptionType,
) -> error::Result<f64> {
    validate_positive(discount_factor, "discount_factor")?;
    Ok(discount_factor * normal_price(forward, strike, vol, expiry, option_type)?)
}

/// Undiscounted price and sensitivities under the normal model.
///
/// With `s = 0` the sensitivities are those of the intrinsic payoff: delta is
/// `ω` strictly in the money and zero otherwise, the rest vanish.
///
/// # Errors
/// Same domain as [`normal_price`].
///
/// # Examples
/// ```
/// use normvol::implied::normal_greeks;
/// use normvol::OptionType;
///
/// let g = normal_greeks(100.0, 100.0, 20.0, 1.0, OptionType::Call).unwrap();
/// assert!((g.delta - 0.5).abs() < 1e-15);
/// assert!((g.delta + g.dual_delta).abs() < 1e-15);
/// ```
pub fn normal_greeks(
    forward: f64,
    strike: f64,
    vol: f64,
    expiry: f64,
    option_type: OptionType,
) -> error::Result<NormalGreeks> {
    validate_finite(forward, "forward")?;
    validate_finite(strike, "strike")?;
    validate_non_negative(vol, "vol")?;
    validate_positive(expiry, "expiry")?;

    let omega = option_type.sign();
    let moneyness = normal_moneyness(forward, strike, option_type);
    let std_dev = total_std_dev(vol, expiry);
    let price = bachelier_value(moneyness, std_dev);

    if std_dev == 0.0 {
        let delta = if moneyness > 0.0 { omega } else { 0.0 };
        return Ok(NormalGreeks {
            price,
            delta,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            dual_delta: -delta,
        });
    }

    let sqrt_t = expiry.sqrt();
    let d = moneyness / std_dev;
    let cdf = norm_cdf(d);
    let pdf = norm_pdf(d);
    Ok(NormalGreeks {
        price,
        delta: omega * cdf,
        gamma: pdf / std_dev,
        vega: sqrt_t * pdf,
        theta: -vol * pdf / (2.0 * sqrt_t),
        dual_delta: -omega * cdf,
    })
}

/// `max(x, 0) + s·f(−|x|/s)` for moneyness `x` and total std dev `s`.
///
/// Writing the in-the-money case through parity keeps the time value in full
/// relative precision.
fn bachelier_value(moneyness: f64, std_dev: f64) -> f64 {
    let intrinsic = moneyness.max(0.0);
    if std_dev == 0.0 {
        return intrinsic;
    }
    intrinsic + std_dev * normalized_time_value(-moneyness.abs() / std_dev)
}

/// Bachelier (normal) implied volatility calculator.
///
/// Inverts the normal pricing formula in closed form: a rational approximation
/// of the normalized moneyness refined by one Householder correction away from
/// the money, and an algebraic inversion of the small-moneyness series near it.
/// There is no iteration loop, so the cost per quote is fixed and there is no
/// convergence failure mode.
///
/// Holds only its [`ImpliedVolConfig`]; every call is independent, so one
/// instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalImpliedVol {
    config: ImpliedVolConfig,
}

impl NormalImpliedVol {
    /// Create a calculator with a custom configuration.
    pub fn new(config: ImpliedVolConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Compute normal (Bachelier) implied volatility from an undiscounted
    /// option price, using the default configuration.
    ///
    /// # Arguments
    /// * `option_price` — Undiscounted market price of the vanilla option
    /// * `forward` — Forward price at expiry
    /// * `strike` — Strike price
    /// * `expiry` — Time to expiry in years (must be > 0)
    /// * `option_type` — Call or Put
    ///
    /// # Errors
    /// Returns [`NormVolError::InvalidInput`] for invalid inputs,
    /// [`NormVolError::ArbitrageViolation`] if the price is below intrinsic value.
    ///
    /// # Examples
    /// ```
    /// use normvol::implied::{normal_price, NormalImpliedVol};
    /// use normvol::OptionType;
    ///
    /// let price = normal_price(0.03, 0.035, 0.008, 2.0, OptionType::Put).unwrap();
    /// let vol = NormalImpliedVol::compute(price, 0.03, 0.035, 2.0, OptionType::Put).unwrap();
    /// assert!((vol.0 - 0.008).abs() < 1e-12);
    /// ```
    pub fn compute(
        option_price: f64,
        forward: f64,
        strike: f64,
        expiry: f64,
        option_type: OptionType,
    ) -> error::Result<Vol> {
        Self::default().implied_vol(option_price, forward, strike, expiry, 1.0, option_type)
    }

    /// Compute normal implied volatility from a discounted option price.
    ///
    /// The price is undiscounted with `discount_factor`, split into intrinsic
    /// value and time value, and inverted on the time value alone so that a
    /// call and its parity-equivalent put give the same volatility.
    ///
    /// A time value within the arbitrage tolerance of zero returns `Vol(0.0)`.
    /// That includes a slightly negative price on an out-of-the-money option,
    /// whose floor is zero.
    ///
    /// Any positive `discount_factor` is accepted. Values above one occur
    /// under negative rates.
    ///
    /// # Errors
    /// Returns [`NormVolError::InvalidInput`] for a non-finite price, forward
    /// or strike, or a non-positive expiry or discount factor;
    /// [`NormVolError::ArbitrageViolation`] if the undiscounted price is below
    /// intrinsic value beyond tolerance, negative prices included;
    /// [`NormVolError::NumericalError`] if the time value is too small
    /// relative to the moneyness to be resolved.
    pub fn implied_vol(
        &self,
        option_price: f64,
        forward: f64,
        strike: f64,
        expiry: f64,
        discount_factor: f64,
        option_type: OptionType,
    ) -> error::Result<Vol> {
        validate_finite(option_price, "option_price")?;
        validate_finite(forward, "forward")?;
        validate_finite(strike, "strike")?;
        validate_positive(expiry, "expiry")?;
        validate_positive(discount_factor, "discount_factor")?;

        let undiscounted = option_price / discount_factor;
        let moneyness = normal_moneyness(forward, strike, option_type);
        let intrinsic = moneyness.max(0.0);
        let time_value = undiscounted - intrinsic;

        let tolerance = self.config.arbitrage_tolerance() * undiscounted.max(1.0);
        if time_value < -tolerance {
            return Err(NormVolError::ArbitrageViolation {
                message: format!(
                    "undiscounted price {undiscounted} is below intrinsic value {intrinsic}"
                ),
            });
        }
        if time_value <= 0.0 {
            return Ok(Vol(0.0));
        }

        let abs_moneyness = moneyness.abs();
        let near_atm = abs_moneyness == 0.0
            || abs_moneyness < self.config.atm_threshold() * straddle_scale(time_value, abs_moneyness);

        #[cfg(feature = "logging")]
        tracing::trace!(
            forward,
            strike,
            expiry,
            time_value,
            near_atm,
            "normal implied vol branch selected"
        );

        let std_dev = if near_atm {
            near_atm_std_dev(time_value, abs_moneyness)
        } else {
            away_from_atm_std_dev(time_value, abs_moneyness)
        };

        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(NormVolError::NumericalError {
                message: format!(
                    "time value {time_value} cannot be resolved at moneyness {abs_moneyness}"
                ),
            });
        }

        Ok(Vol(std_dev / expiry.sqrt()))
    }
}

/// `√(2π)·(τ + |F−K|/2)`, the ATM-equivalent total std dev implied by the
/// straddle half-price; the near-ATM switch compares `|F−K|` against it.
fn straddle_scale(time_value: f64, abs_moneyness: f64) -> f64 {
    crate::math::SQRT_2PI * (time_value + 0.5 * abs_moneyness)
}
