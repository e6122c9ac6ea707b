//! Error types for the normvol library.
//!
//! All fallible operations return `Result<T, NormVolError>` rather than panicking.
//! Pricing and inversion are deterministic, so none of these errors is transient:
//! a caller running a calibration should drop the offending quote, not retry it.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, NormVolError>;

/// Errors raised by normal-model pricing and implied volatility inversion.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NormVolError {
    /// Input data is invalid (e.g., negative vol, zero expiry, non-positive discount factor).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The quoted price lies below the intrinsic-value floor, so no volatility reproduces it.
    #[error("arbitrage violation: {message}")]
    ArbitrageViolation { message: String },

    /// Numerical computation produced a non-finite result.
    #[error("numerical error: {message}")]
    NumericalError { message: String },
}
