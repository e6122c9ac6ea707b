//! Tuning knobs for the implied normal volatility inversion.

use serde::{Deserialize, Serialize};

use crate::error::{self, NormVolError};
use crate::validate::validate_non_negative;

/// Default near-ATM switch: the series branch is used when `|F − K|` is below
/// this fraction of the straddle-scaled time value.
pub const DEFAULT_ATM_THRESHOLD: f64 = 1e-2;

/// Default relative slack below intrinsic value tolerated as rounding noise.
pub const DEFAULT_ARBITRAGE_TOLERANCE: f64 = 1e-12;

/// Largest accepted ATM threshold. Beyond it the truncated series is no longer
/// accurate to 1e-7 in volatility.
const MAX_ATM_THRESHOLD: f64 = 0.1;

/// Configuration for [`NormalImpliedVol`](super::NormalImpliedVol).
///
/// Deserialization re-runs the same validation as [`ImpliedVolConfig::new`].
///
/// # Examples
/// ```
/// use normvol::implied::ImpliedVolConfig;
///
/// let cfg = ImpliedVolConfig::new(5e-3, 1e-10).unwrap();
/// assert_eq!(cfg.atm_threshold(), 5e-3);
/// assert!(ImpliedVolConfig::new(0.5, 1e-10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ImpliedVolConfigRaw", into = "ImpliedVolConfigRaw")]
pub struct ImpliedVolConfig {
    /// Relative moneyness below which the near-ATM series is used.
    atm_threshold: f64,
    /// Relative tolerance on the intrinsic-value floor.
    arbitrage_tolerance: f64,
}

#[derive(Serialize, Deserialize)]
struct ImpliedVolConfigRaw {
    atm_threshold: f64,
    arbitrage_tolerance: f64,
}

impl TryFrom<ImpliedVolConfigRaw> for ImpliedVolConfig {
    type Error = NormVolError;
    fn try_from(raw: ImpliedVolConfigRaw) -> Result<Self, Self::Error> {
        Self::new(raw.atm_threshold, raw.arbitrage_tolerance)
    }
}

impl From<ImpliedVolConfig> for ImpliedVolConfigRaw {
    fn from(c: ImpliedVolConfig) -> Self {
        Self {
            atm_threshold: c.atm_threshold,
            arbitrage_tolerance: c.arbitrage_tolerance,
        }
    }
}

impl ImpliedVolConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    /// Returns [`NormVolError::InvalidInput`] if `atm_threshold` is outside
    /// `[0, 0.1]` or `arbitrage_tolerance` is negative or non-finite.
    pub fn new(atm_threshold: f64, arbitrage_tolerance: f64) -> error::Result<Self> {
        validate_non_negative(atm_threshold, "atm_threshold")?;
        if atm_threshold > MAX_ATM_THRESHOLD {
            return Err(NormVolError::InvalidInput {
                message: format!(
                    "atm_threshold must be at most {MAX_ATM_THRESHOLD}, got {atm_threshold}"
                ),
            });
        }
        validate_non_negative(arbitrage_tolerance, "arbitrage_tolerance")?;
        Ok(Self {
            atm_threshold,
            arbitrage_tolerance,
        })
    }

    /// Returns the near-ATM switch threshold.
    pub fn atm_threshold(&self) -> f64 {
        self.atm_threshold
    }

    /// Returns the relative tolerance on the intrinsic-value floor.
    pub fn arbitrage_tolerance(&self) -> f64 {
        self.arbitrage_tolerance
    }
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            atm_threshold: DEFAULT_ATM_THRESHOLD,
            arbitrage_tolerance: DEFAULT_ARBITRAGE_TOLERANCE,
        }
    }
}
