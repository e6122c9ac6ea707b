//! Batch inversion over independent option quotes.

use serde::{Deserialize, Serialize};

use crate::error;
use crate::implied::normal::NormalImpliedVol;
use crate::types::{OptionType, Vol};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One discounted option quote to invert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalQuote {
    /// Discounted market price.
    pub option_price: f64,
    pub forward: f64,
    pub strike: f64,
    /// Time to expiry in years.
    pub expiry: f64,
    pub discount_factor: f64,
    pub option_type: OptionType,
}

impl NormalImpliedVol {
    /// Invert every quote in `quotes`, returning one result per quote in order.
    ///
    /// A quote that fails validation or violates the arbitrage floor yields an
    /// `Err` in its slot without affecting the others. With the `parallel`
    /// feature the quotes are spread across the rayon pool.
    ///
    /// # Examples
    /// ```
    /// use normvol::implied::{NormalImpliedVol, NormalQuote};
    /// use normvol::OptionType;
    ///
    /// let quotes = [
    ///     NormalQuote { option_price: 0.004, forward: 0.02, strike: 0.02, expiry: 1.0, discount_factor: 0.98, option_type: OptionType::Call },
    ///     NormalQuote { option_price: 0.001, forward: 0.02, strike: 0.01, expiry: 1.0, discount_factor: 0.98, option_type: OptionType::Call },
    /// ];
    /// let vols = NormalImpliedVol::default().implied_vols(&quotes);
    /// assert!(vols[0].is_ok());
    /// assert!(vols[1].is_err()); // below the 0.01 intrinsic value
    /// ```
    pub fn implied_vols(&self, quotes: &[NormalQuote]) -> Vec<error::Result<Vol>> {
        #[cfg(feature = "logging")]
        tracing::debug!(n_quotes = quotes.len(), "normal implied vol batch started");

        let invert = |q: &NormalQuote| {
            self.implied_vol(
                q.option_price,
                q.forward,
                q.strike,
                q.expiry,
                q.discount_factor,
                q.option_type,
            )
        };

        #[cfg(feature = "parallel")]
        let vols: Vec<error::Result<Vol>> = quotes.par_iter().map(invert).collect();
        #[cfg(not(feature = "parallel"))]
        let vols: Vec<error::Result<Vol>> = quotes.iter().map(invert).collect();

        #[cfg(feature = "logging")]
        tracing::debug!(
            n_failed = vols.iter().filter(|v| v.is_err()).count(),
            "normal implied vol batch complete"
        );

        vols
    }
}
