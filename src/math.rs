//! Standard normal density and distribution function.


/// `1/√(2π)`.
pub(crate) const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// `√(2π)`.
pub(crate) const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Standard normal density φ(x).
pub(crate) fn norm_pdf(x: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal distribution function Φ(x).
///
/// Evaluated through `erfc` so the lower tail keeps full relative precision.
pub(crate) fn norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x * std::f64::consts::FRAC_1_SQRT_2)
}
