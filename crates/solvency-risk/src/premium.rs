//! Premium rate for insuring a collateralized position.
//!
//! The rate is the price of a digital payoff on the collateral-to-debt
//! ratio `V_c / V_d` under a log-normal model:
//!
//! ```text
//! d     = (ln(V_c / V_d) - σ²/2) / σ
//! long  = payoff · erfc( d/√2) / 2 / V_d
//! short = payoff · erfc(-d/√2) / 2 / V_c
//! ```
//!
//! and is then clamped to `[MIN_PREMIUM_RATE · scale, MAX_PREMIUM_RATE]`.

use serde::{Deserialize, Serialize};
use solvency_math::special::erfc;
use std::f64::consts::SQRT_2;
use tracing::trace;

use crate::error::{RiskError, RiskResult};
use crate::types::Exposure;

/// Ceiling on any quoted rate.
pub const MAX_PREMIUM_RATE: f64 = 0.42;

/// Floor on the quoted rate at unit scale.
pub const MIN_PREMIUM_RATE: f64 = 0.0042;

/// Quotes premium rates with a scaled floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumModel {
    scale: f64,
}

impl Default for PremiumModel {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl PremiumModel {
    /// Creates a model whose floor is `MIN_PREMIUM_RATE · scale`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the scale is not positive or pushes
    /// the floor above [`MAX_PREMIUM_RATE`].
    pub fn new(scale: f64) -> RiskResult<Self> {
        if !(scale > 0.0 && MIN_PREMIUM_RATE * scale <= MAX_PREMIUM_RATE) {
            return Err(RiskError::invalid_parameter(
                "scale",
                scale,
                "scale must be positive and keep the floor at or below the ceiling",
            ));
        }
        Ok(Self { scale })
    }

    /// Floor scaling factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Lowest rate this model quotes.
    #[must_use]
    pub fn min_rate(&self) -> f64 {
        MIN_PREMIUM_RATE * self.scale
    }

    /// Premium rate for a position.
    ///
    /// `collateral_value` and `debt_value` are market values in the same
    /// unit; `volatility` is that of the collateral.
    pub fn rate(
        &self,
        payoff: f64,
        collateral_value: f64,
        debt_value: f64,
        volatility: f64,
        exposure: Exposure,
    ) -> RiskResult<f64> {
        if !(payoff.is_finite() && payoff >= 0.0) {
            return Err(RiskError::invalid_input(format!(
                "payoff must be non-negative, got {payoff}"
            )));
        }
        if !(collateral_value.is_finite() && collateral_value > 0.0)
            || !(debt_value.is_finite() && debt_value > 0.0)
        {
            return Err(RiskError::invalid_input(format!(
                "collateral and debt values must be positive, got {collateral_value} and {debt_value}"
            )));
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(RiskError::invalid_parameter(
                "volatility",
                volatility,
                "premium volatility must be positive",
            ));
        }

        let log_ratio = (collateral_value / debt_value).ln();
        let d = (log_ratio - volatility * volatility / 2.0) / volatility;
        let z = d / SQRT_2;
        let raw = match exposure {
            Exposure::Long => payoff * erfc(z) / 2.0 / debt_value,
            Exposure::Short => payoff * erfc(-z) / 2.0 / collateral_value,
        };
        let rate = if raw > MAX_PREMIUM_RATE {
            MAX_PREMIUM_RATE
        } else if raw < self.min_rate() {
            self.min_rate()
        } else {
            raw
        };

        trace!(d, raw, rate, "quoted premium rate");
        Ok(rate)
    }
}

/// Premium rate at unit scale.
pub fn premium_rate(
    payoff: f64,
    collateral_value: f64,
    debt_value: f64,
    volatility: f64,
    exposure: Exposure,
) -> RiskResult<f64> {
    PremiumModel::default().rate(payoff, collateral_value, debt_value, volatility, exposure)
}
