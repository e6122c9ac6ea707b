//! # normvol
//!
//! Bachelier (normal) model option pricing and implied normal volatility.
//!
//! Provides the two directions of the normal model: option price from a normal
//! volatility, and normal volatility from an option price. The inversion is
//! closed-form and stays accurate across the whole moneyness range, including
//! strikes within a rounding error of the forward.
//!
//! ## Architecture
//!
//! - **`implied`** — Pricing, Greeks and implied volatility (single and batch)
//! - **`conventions`** — Normal-model moneyness and intrinsic value
//! - **`types`** — [`Vol`], [`OptionType`], [`NormalGreeks`]
//!
//! ## Design
//!
//! - **Newtypes for outputs, bare `f64` for inputs.** The inversion returns
//!   [`Vol`]; every entry point takes raw `f64` and validates it.
//! - **No panics.** Every fallible operation returns [`Result`]. Library code
//!   never calls `unwrap()` or `expect()`.
//! - **Stateless.** Pricing functions are free functions and
//!   [`NormalImpliedVol`](implied::NormalImpliedVol) carries only its
//!   configuration, so calls can run concurrently from any number of threads.
//! - **Serializable.** Value types implement Serde `Serialize` / `Deserialize`,
//!   with validation on deserialization where invariants exist.
//!
//! ## Features
//!
//! - `parallel` (default) — batch inversion on the rayon thread pool
//! - `logging` (default) — `tracing` events at branch selection and batch boundaries

pub mod conventions;
pub mod error;
pub mod implied;
mod math;
pub mod types;
mod validate;

#[doc(inline)]
pub use error::{NormVolError, Result};
#[doc(inline)]
pub use implied::{normal_price, NormalImpliedVol};
#[doc(inline)]
pub use types::{NormalGreeks, OptionType, Vol};
