//! Result types for stress, shortfall and contribution calculations.

use serde::{Deserialize, Serialize};

/// Fractional adverse move applied to total collateral value.
///
/// Conceptually in `[-1, +∞)`: a long exposure never loses more than 100%,
/// a short exposure can lose without bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    /// Fractional loss (0.25 means a 25% drop in value).
    pub fractional_loss: f64,
}

/// Stressed collateral value and the shortfall against debt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShortfallResult {
    /// Market value of the collateral before stress.
    pub total_value: f64,

    /// Portfolio volatility used for the stress.
    pub volatility: f64,

    /// Fractional loss applied to `total_value`.
    pub stress_fraction: f64,

    /// Collateral value after stress, floored at zero.
    pub stressed_value: f64,

    /// `max(debt - stressed_value, 0)`.
    pub shortfall: f64,
}

impl ShortfallResult {
    /// Result for a portfolio whose collateral is worth nothing: the whole
    /// debt is short.
    #[must_use]
    pub fn valueless(debt: f64) -> Self {
        Self {
            total_value: 0.0,
            volatility: 0.0,
            stress_fraction: 0.0,
            stressed_value: 0.0,
            shortfall: debt,
        }
    }

    /// Returns true if the stressed collateral does not cover the debt.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.shortfall > 0.0
    }
}

/// Shortfall under both standard scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// 90% confidence (worst 10% of outcomes).
    pub tail: ShortfallResult,

    /// 50% confidence.
    pub average: ShortfallResult,
}

/// A pledge's standalone shortfall and its marginal effect on the pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionResult {
    /// Shortfall of the pledge evaluated on its own.
    pub standalone_shortfall: f64,

    /// Pool shortfall minus the shortfall of the pool without this pledge.
    pub marginal_delta: f64,

    /// Stressed pool value minus the stressed value of the pool without
    /// this pledge.
    pub value_delta: f64,
}

impl ContributionResult {
    /// Fraction of the stressed pool value this pledge accounts for.
    ///
    /// Zero when the pool has no stressed value.
    #[must_use]
    pub fn value_share(&self, pool_stressed_value: f64) -> f64 {
        if pool_stressed_value > 0.0 {
            self.value_delta / pool_stressed_value
        } else {
            0.0
        }
    }
}

/// Pool-level shortfall with every member's contribution.
///
/// `delta_sum` is not expected to equal `pool.shortfall`: leave-one-out
/// deltas are a finite-difference approximation, not an additive allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionReport {
    /// Shortfall of the aggregated pool.
    pub pool: ShortfallResult,

    /// One entry per pledge, in input order.
    pub contributions: Vec<ContributionResult>,

    /// Sum of standalone shortfalls.
    pub standalone_tally: f64,

    /// Sum of marginal deltas.
    pub delta_sum: f64,
}

impl ContributionReport {
    /// Pool shortfall not explained by the sum of marginal deltas.
    #[must_use]
    pub fn additivity_gap(&self) -> f64 {
        self.pool.shortfall - self.delta_sum
    }

    /// Reduction in shortfall obtained by pooling, relative to the members
    /// standing alone.
    #[must_use]
    pub fn diversification_benefit(&self) -> f64 {
        self.standalone_tally - self.pool.shortfall
    }

    /// Each member's share of the stressed pool value, in input order.
    #[must_use]
    pub fn value_shares(&self) -> Vec<f64> {
        self.contributions
            .iter()
            .map(|c| c.value_share(self.pool.stressed_value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valueless() {
        let result = ShortfallResult::valueless(250.0);
        assert_eq!(result.shortfall, 250.0);
        assert_eq!(result.stressed_value, 0.0);
        assert!(result.is_short());
        assert!(!ShortfallResult::valueless(0.0).is_short());
    }

    #[test]
    fn test_report_gap() {
        let report = ContributionReport {
            pool: ShortfallResult {
                total_value: 100.0,
                volatility: 0.2,
                stress_fraction: 0.3,
                stressed_value: 70.0,
                shortfall: 30.0,
            },
            contributions: vec![
                ContributionResult {
                    standalone_shortfall: 20.0,
                    marginal_delta: 18.0,
                    value_delta: 35.0,
                },
                ContributionResult {
                    standalone_shortfall: 15.0,
                    marginal_delta: 10.0,
                    value_delta: 28.0,
                },
            ],
            standalone_tally: 35.0,
            delta_sum: 28.0,
        };
        assert_eq!(report.additivity_gap(), 2.0);
        assert_eq!(report.diversification_benefit(), 5.0);
        assert_eq!(report.value_shares(), vec![0.5, 0.4]);
    }

    #[test]
    fn test_value_share_without_stressed_value() {
        let contribution = ContributionResult {
            standalone_shortfall: 10.0,
            marginal_delta: 10.0,
            value_delta: 0.0,
        };
        assert_eq!(contribution.value_share(0.0), 0.0);
        assert_eq!(contribution.value_share(-1.0), 0.0);
    }
}
