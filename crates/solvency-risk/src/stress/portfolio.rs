//! Portfolio-level collateral stress and shortfall.

use tracing::{trace, warn};

use super::model::StressModel;
use crate::correlation::CorrelationMatrix;
use crate::error::{RiskError, RiskResult};
use crate::types::{
    validate_assets, AssetParameters, Pledge, ScenarioReport, ShortfallResult, StressConfig,
    StressScenario,
};

/// Evaluates the stressed value and debt shortfall of a pledge's collateral.
///
/// ## Method
///
/// 1. Value each holding: `v_i = collateral_i × price_i`, `V = Σ v_i`
/// 2. Weights `w_i = v_i / V`
/// 3. Portfolio variance (see below), `σ_p = √variance`
/// 4. `f = stress(α, σ_p, exposure)`
/// 5. `stressed = max((1 - f) × V, 0)`, `shortfall = max(debt - stressed, 0)`
///
/// When the collateral sits in a single asset the variance is
/// `2·w·σ + w²·σ²`. With holdings in several assets it is
/// `Σ_i Σ_j w_i w_j σ_i σ_j ρ_ij`, where `ρ` defaults to 1 for every pair
/// unless a [`CorrelationMatrix`] is supplied.
///
/// The rule is chosen by the assets actually held, not by the size of the
/// universe, so padding a pledge with zero holdings does not change its
/// result. The two rules do not meet: a pledge holding a sliver of a second
/// asset is stressed noticeably less than one holding the first asset alone.
///
/// A pledge whose collateral is worth nothing is not an error: its
/// shortfall is the full debt.
#[derive(Debug, Clone)]
pub struct PortfolioStress {
    config: StressConfig,
    model: StressModel,
    correlation: Option<CorrelationMatrix>,
}

impl PortfolioStress {
    /// Creates an evaluator for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the confidence level is outside `(0, 1)`.
    pub fn new(config: StressConfig) -> RiskResult<Self> {
        config.validate()?;
        let model = StressModel::new(config.confidence)?;
        Ok(Self {
            config,
            model,
            correlation: None,
        })
    }

    /// Uses an explicit asset correlation matrix for multi-asset variance.
    #[must_use]
    pub fn with_correlation(mut self, correlation: CorrelationMatrix) -> Self {
        self.correlation = Some(correlation);
        self
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &StressConfig {
        &self.config
    }

    /// The stress model in use.
    #[must_use]
    pub fn model(&self) -> &StressModel {
        &self.model
    }

    /// The correlation matrix, if one was supplied.
    #[must_use]
    pub fn correlation(&self) -> Option<&CorrelationMatrix> {
        self.correlation.as_ref()
    }

    /// Stressed value and shortfall of one pledge.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the collateral length differs from the
    ///   asset count (or the correlation matrix size)
    /// - `InvalidInput` for negative amounts, negative volatility or a
    ///   non-positive price, and for valuations that overflow `f64`
    pub fn evaluate(
        &self,
        pledge: &Pledge,
        assets: &[AssetParameters],
    ) -> RiskResult<ShortfallResult> {
        self.check_universe(assets)?;
        pledge.validate(assets.len())?;
        self.evaluate_validated(pledge, assets)
    }

    /// Shortfall under the tail (90%) and average (50%) scenarios.
    pub fn evaluate_scenarios(
        &self,
        pledge: &Pledge,
        assets: &[AssetParameters],
    ) -> RiskResult<ScenarioReport> {
        let scenario = |s: StressScenario| -> RiskResult<ShortfallResult> {
            let mut evaluator = Self::new(self.config.clone().with_confidence(s.confidence()))?;
            evaluator.correlation.clone_from(&self.correlation);
            evaluator.evaluate(pledge, assets)
        };
        Ok(ScenarioReport {
            tail: scenario(StressScenario::Tail)?,
            average: scenario(StressScenario::Average)?,
        })
    }

    /// Volatility of a portfolio holding the given market values.
    pub fn portfolio_volatility(
        &self,
        values: &[f64],
        assets: &[AssetParameters],
    ) -> RiskResult<f64> {
        if values.len() != assets.len() {
            return Err(RiskError::dimension_mismatch(
                "portfolio values",
                assets.len(),
                values.len(),
            ));
        }
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return Ok(0.0);
        }
        let weights: Vec<f64> = values.iter().map(|v| v / total).collect();
        Ok(self.variance(&weights, assets)?.sqrt())
    }

    /// Checks the asset universe and its agreement with the correlation matrix.
    pub(crate) fn check_universe(&self, assets: &[AssetParameters]) -> RiskResult<()> {
        if let Some(rho) = &self.correlation {
            if rho.dim() != assets.len() {
                return Err(RiskError::dimension_mismatch(
                    "correlation matrix",
                    assets.len(),
                    rho.dim(),
                ));
            }
        }
        validate_assets(assets)
    }

    /// Evaluation without input checks, for callers that already validated.
    pub(crate) fn evaluate_validated(
        &self,
        pledge: &Pledge,
        assets: &[AssetParameters],
    ) -> RiskResult<ShortfallResult> {
        let values = pledge.values(assets);
        let total_value: f64 = values.iter().sum();

        if !(total_value.is_finite() && pledge.debt.is_finite()) {
            return Err(RiskError::invalid_input(format!(
                "pledge valuation overflows: value {total_value}, debt {}",
                pledge.debt
            )));
        }

        if total_value <= 0.0 {
            trace!(debt = pledge.debt, "valueless collateral, shortfall equals debt");
            return Ok(ShortfallResult::valueless(pledge.debt));
        }

        let weights: Vec<f64> = values.iter().map(|v| v / total_value).collect();
        let volatility = self.variance(&weights, assets)?.sqrt();
        if !volatility.is_finite() {
            return Err(RiskError::invalid_input(format!(
                "portfolio volatility is not finite: {volatility}"
            )));
        }
        let stress_fraction = self
            .model
            .stress(volatility, self.config.exposure)
            .fractional_loss;

        let mut stressed_value = (1.0 - stress_fraction) * total_value;
        if stressed_value < 0.0 {
            warn!(
                stress_fraction,
                total_value, "stress exceeds 100% of collateral value, clamping to zero"
            );
            stressed_value = 0.0;
        }
        let shortfall = (pledge.debt - stressed_value).max(0.0);

        trace!(
            total_value,
            volatility,
            stress_fraction,
            stressed_value,
            shortfall,
            "evaluated pledge"
        );

        Ok(ShortfallResult {
            total_value,
            volatility,
            stress_fraction,
            stressed_value,
            shortfall,
        })
    }

    fn variance(&self, weights: &[f64], assets: &[AssetParameters]) -> RiskResult<f64> {
        let mut held = weights.iter().zip(assets).filter(|(w, _)| **w > 0.0);
        if let (Some((w, asset)), None) = (held.next(), held.next()) {
            let s = asset.volatility;
            return Ok(2.0 * w * s + (w * w) * (s * s));
        }

        let scaled: Vec<f64> = weights
            .iter()
            .zip(assets)
            .map(|(w, asset)| w * asset.volatility)
            .collect();

        let variance = match &self.correlation {
            Some(rho) => rho.quadratic_form(&scaled)?,
            None => {
                let sum: f64 = scaled.iter().sum();
                sum * sum
            }
        };
        Ok(variance.max(0.0))
    }
}

/// Stressed value and shortfall of a pledge under the standard scenario.
pub fn evaluate(pledge: &Pledge, assets: &[AssetParameters]) -> RiskResult<ShortfallResult> {
    PortfolioStress::new(StressConfig::default())?.evaluate(pledge, assets)
}
