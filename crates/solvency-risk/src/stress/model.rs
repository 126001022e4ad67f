//! CVaR-style stress model.
//!
//! For a normal loss distribution the expected tail beyond the quantile
//! `d = Φ⁻¹(α)` is `φ(d) / (1 - α)` standard deviations. Scaling by the
//! portfolio volatility gives the tail move `m`, which is turned into a
//! fractional loss with an exponential (log-normal) price response:
//!
//! ```text
//! long:  loss = 1 - exp(-m)     (bounded by 100%)
//! short: loss = exp(m) - 1      (uncapped)
//! ```

use solvency_math::distributions::{normal_pdf, normal_quantile};

use crate::error::RiskResult;
use crate::types::{Exposure, StressResult};

/// Stress model at a fixed confidence level.
///
/// The quantile and density terms only depend on `α`, so they are computed
/// once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressModel {
    confidence: f64,
    tail_factor: f64,
}

impl StressModel {
    /// Creates a model for confidence level `α`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when `α` is not strictly inside `(0, 1)`.
    pub fn new(confidence: f64) -> RiskResult<Self> {
        let d = normal_quantile(confidence)?;
        let tail_factor = normal_pdf(d) / (1.0 - confidence);
        Ok(Self {
            confidence,
            tail_factor,
        })
    }

    /// Confidence level of the model.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Expected tail move per unit of volatility, `φ(d) / (1 - α)`.
    #[must_use]
    pub fn tail_factor(&self) -> f64 {
        self.tail_factor
    }

    /// Fractional loss for a portfolio with the given volatility.
    ///
    /// Zero volatility yields zero loss in either direction. The volatility
    /// is not range-checked here; callers validate their inputs.
    #[must_use]
    pub fn stress(&self, volatility: f64, exposure: Exposure) -> StressResult {
        let tail = self.tail_factor * volatility;
        let fractional_loss = match exposure {
            Exposure::Short => tail.exp() - 1.0,
            Exposure::Long => -((-tail).exp() - 1.0),
        };
        StressResult { fractional_loss }
    }
}

/// Fractional loss at confidence `α` for the given volatility and direction.
///
/// # Example
///
/// ```rust
/// use solvency_risk::stress::stress;
/// use solvency_risk::types::Exposure;
///
/// let long = stress(0.90, 0.4, Exposure::Long).unwrap();
/// assert!(long.fractional_loss > 0.0 && long.fractional_loss < 1.0);
///
/// let flat = stress(0.90, 0.0, Exposure::Short).unwrap();
/// assert_eq!(flat.fractional_loss, 0.0);
/// ```
pub fn stress(confidence: f64, volatility: f64, exposure: Exposure) -> RiskResult<StressResult> {
    Ok(StressModel::new(confidence)?.stress(volatility, exposure))
}
