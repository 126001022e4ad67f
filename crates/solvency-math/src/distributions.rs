//! Standard normal distribution helpers.
//!
//! The quantile uses the Abramowitz & Stegun 26.2.23 rational approximation,
//! whose absolute error is below 4.5e-4 across the open unit interval.
//! It is cheap and deterministic, which is what a stress scenario at a
//! fixed confidence level needs; it is not a high-precision inverse.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::error::{MathError, MathResult};
use crate::special::erfc;

/// Numerator coefficients of A&S 26.2.23.
const C: [f64; 3] = [2.515_517, 0.802_853, 0.010_328];

/// Denominator coefficients of A&S 26.2.23.
const D: [f64; 3] = [1.432_788, 0.189_269, 0.001_308];

/// Upper-tail inverse for `t = sqrt(-2 ln q)`, valid for `q` in `(0, 0.5]`.
#[inline]
fn rational_approximation(t: f64) -> f64 {
    t - ((C[2] * t + C[1]) * t + C[0]) / (((D[2] * t + D[1]) * t + D[0]) * t + 1.0)
}

/// Standard normal quantile (inverse CDF).
///
/// For `p < 0.5` the lower tail is mirrored: `Φ⁻¹(p) = -G(√(-2 ln p))`;
/// otherwise `Φ⁻¹(p) = G(√(-2 ln(1 - p)))`.
///
/// # Errors
///
/// Returns [`MathError::InvalidParameter`] when `p` is not strictly inside
/// `(0, 1)` (NaN included).
///
/// # Example
///
/// ```rust
/// use solvency_math::distributions::normal_quantile;
///
/// let z = normal_quantile(0.90).unwrap();
/// assert!((z - 1.281_551_565_5).abs() < 4.5e-4);
/// assert!(normal_quantile(1.0).is_err());
/// ```
pub fn normal_quantile(p: f64) -> MathResult<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(MathError::invalid_parameter(
            "p",
            p,
            "probability must lie strictly between 0 and 1",
        ));
    }

    if p < 0.5 {
        let n = -2.0 * p.ln();
        Ok(-rational_approximation(n.sqrt()))
    } else {
        let n = -2.0 * (1.0 - p).ln();
        Ok(rational_approximation(n.sqrt()))
    }
}

/// Standard normal cumulative distribution function, `Φ(x) = ½·erfc(-x/√2)`.
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal probability density function.
#[must_use]
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
