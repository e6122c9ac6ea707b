//! Normal (Bachelier) pricing and implied volatility extraction.
//!
//! - [`normal_price`] / [`normal_price_discounted`] — closed-form forward pricing
//! - [`normal_greeks`] — price with delta, gamma, vega, theta and dual delta
//! - [`NormalImpliedVol`] — closed-form implied normal volatility, single quote
//!   or batched over [`NormalQuote`]s
//! - [`ImpliedVolConfig`] — near-ATM switch and arbitrage tolerance

pub mod batch;
mod closed_form;
pub mod config;
pub mod normal;

pub use batch::NormalQuote;
pub use config::ImpliedVolConfig;
pub use normal::{normal_greeks, normal_price, normal_price_discounted, NormalImpliedVol};
