//! Core domain types for normal-model pricing.
//!
//! **Outputs use newtypes**: [`Vol`] wraps the implied normal volatility so it
//! cannot be confused with a price or a total standard deviation.
//!
//! **Inputs use bare `f64`**: `normal_price(forward, strike, vol, ...)` takes raw
//! floats; parameter names carry the meaning and validation happens inside each
//! entry point.
//!
//! These types wrap `f64`, so they derive `PartialEq`/`PartialOrd` only.

use serde::{Deserialize, Serialize};

/// Normal (Bachelier) volatility `σ`, in price units per square-root year.
///
/// Unlike a lognormal vol this is not a percentage: a normal vol of 0.0080 on a
/// rate means 80bp per annum.
///
/// # Examples
/// ```
/// use normvol::types::Vol;
/// let vol = Vol(0.0080);
/// assert_eq!(vol.0, 0.0080);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vol(pub f64);

/// Option type: call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to buy at strike price.
    Call,
    /// Right to sell at strike price.
    Put,
}

impl OptionType {
    /// Payoff sign `ω`: `+1` for a call, `-1` for a put.
    ///
    /// ```
    /// use normvol::OptionType;
    /// assert_eq!(OptionType::Call.sign(), 1.0);
    /// assert_eq!(OptionType::Put.sign(), -1.0);
    /// ```
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

/// Undiscounted normal-model price together with its first-order and
/// second-order sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalGreeks {
    /// Undiscounted option value.
    pub price: f64,
    /// ∂price/∂F.
    pub delta: f64,
    /// ∂²price/∂F².
    pub gamma: f64,
    /// ∂price/∂σ.
    pub vega: f64,
    /// −∂price/∂T (time decay per year).
    pub theta: f64,
    /// ∂price/∂K.
    pub dual_delta: f64,
}
