//! Leave-one-out marginal contribution to pool shortfall.

use tracing::debug;

use crate::error::RiskResult;
use crate::parallel::maybe_parallel_map;
use crate::stress::PortfolioStress;
use crate::types::{
    aggregate, leave_one_out, AssetParameters, ContributionReport, ContributionResult, Pledge,
    StressConfig,
};

/// Allocates pool shortfall to its members.
///
/// For each pledge `m`:
///
/// ```text
/// standalone(m) = shortfall(m)
/// delta(m)      = shortfall(pool) - shortfall(pool without m)
/// ```
///
/// The pool without `m` is aggregated from the other members directly,
/// never by subtracting `m` from the pool totals.
///
/// This is a finite-difference approximation of marginal risk, not an
/// Euler allocation: `Σ delta(m)` generally differs from the pool
/// shortfall. The difference is reported, never forced to zero.
#[derive(Debug, Clone)]
pub struct MarginalAllocator {
    stress: PortfolioStress,
}

impl MarginalAllocator {
    /// Creates an allocator on top of a portfolio stress evaluator.
    #[must_use]
    pub fn new(stress: PortfolioStress) -> Self {
        Self { stress }
    }

    /// The underlying evaluator.
    #[must_use]
    pub fn stress(&self) -> &PortfolioStress {
        &self.stress
    }

    /// Standalone shortfall and marginal delta for each pledge, in input order.
    pub fn compute_contributions(
        &self,
        pool: &[Pledge],
        assets: &[AssetParameters],
    ) -> RiskResult<Vec<ContributionResult>> {
        Ok(self.report(pool, assets)?.contributions)
    }

    /// Pool shortfall, per-pledge contributions and their aggregates.
    ///
    /// Every pledge is validated before any arithmetic. The leave-one-out
    /// evaluations are independent and fan out across threads for large
    /// pools.
    pub fn report(
        &self,
        pool: &[Pledge],
        assets: &[AssetParameters],
    ) -> RiskResult<ContributionReport> {
        self.stress.check_universe(assets)?;
        let totals = aggregate(pool, assets.len())?;
        let pool_result = self.stress.evaluate_validated(&totals, assets)?;

        let members: Vec<(&Pledge, Pledge)> = pool
            .iter()
            .zip(leave_one_out(pool, assets.len())?)
            .collect();

        let evaluate_member =
            |(member, rest): &(&Pledge, Pledge)| -> RiskResult<ContributionResult> {
                let standalone = self.stress.evaluate_validated(member, assets)?;
                let without = self.stress.evaluate_validated(rest, assets)?;
                Ok(ContributionResult {
                    standalone_shortfall: standalone.shortfall,
                    marginal_delta: pool_result.shortfall - without.shortfall,
                    value_delta: pool_result.stressed_value - without.stressed_value,
                })
            };
        let contributions = maybe_parallel_map(&members, self.stress.config(), evaluate_member)
            .into_iter()
            .collect::<RiskResult<Vec<_>>>()?;

        let standalone_tally: f64 = contributions.iter().map(|c| c.standalone_shortfall).sum();
        let delta_sum: f64 = contributions.iter().map(|c| c.marginal_delta).sum();

        debug!(
            members = pool.len(),
            pool_shortfall = pool_result.shortfall,
            standalone_tally,
            delta_sum,
            "computed leave-one-out contributions"
        );

        Ok(ContributionReport {
            pool: pool_result,
            contributions,
            standalone_tally,
            delta_sum,
        })
    }
}

/// Contributions under the standard collateral scenario.
pub fn compute_contributions(
    pool: &[Pledge],
    assets: &[AssetParameters],
) -> RiskResult<Vec<ContributionResult>> {
    let stress = PortfolioStress::new(StressConfig::default())?;
    MarginalAllocator::new(stress).compute_contributions(pool, assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RiskError;
    use approx::assert_abs_diff_eq;

    fn allocator() -> MarginalAllocator {
        MarginalAllocator::new(PortfolioStress::new(StressConfig::sequential()).unwrap())
    }

    #[test]
    fn test_empty_pool() {
        let assets = vec![AssetParameters::new(1.0, 0.4)];
        let report = allocator().report(&[], &assets).unwrap();
        assert!(report.contributions.is_empty());
        assert_eq!(report.pool.shortfall, 0.0);
        assert_eq!(report.delta_sum, 0.0);
    }

    #[test]
    fn test_single_member_delta_equals_shortfall() {
        let assets = vec![AssetParameters::new(1.0, 0.4)];
        let pledge = Pledge::new(1500.0, vec![1200.0]);
        let report = allocator().report(&[pledge], &assets).unwrap();

        // Without its only member the pool is empty and has no shortfall
        let only = report.contributions[0];
        assert_abs_diff_eq!(only.marginal_delta, report.pool.shortfall, epsilon = 1e-12);
        assert_abs_diff_eq!(only.standalone_shortfall, report.pool.shortfall, epsilon = 1e-12);
    }

    #[test]
    fn test_safe_member_has_negative_delta() {
        // An overcollateralized, debt-free member offsets the others
        let assets = vec![AssetParameters::new(1.0, 0.4)];
        let pool = vec![Pledge::new(1000.0, vec![800.0]), Pledge::new(0.0, vec![2000.0])];
        let contributions = allocator().compute_contributions(&pool, &assets).unwrap();

        assert_eq!(contributions[1].standalone_shortfall, 0.0);
        assert!(contributions[1].marginal_delta < 0.0);
    }

    #[test]
    fn test_mixed_magnitudes_keep_small_members() {
        let assets = vec![AssetParameters::new(1.0, 0.4)];
        let pool = vec![Pledge::new(0.0, vec![1e17]), Pledge::new(10.0, vec![1.0])];
        let report = allocator().report(&pool, &assets).unwrap();

        // The whale covers every debt, so the pool has no shortfall. Without
        // it the small member stands alone.
        assert_eq!(report.pool.shortfall, 0.0);
        let small_alone = report.contributions[1].standalone_shortfall;
        assert_abs_diff_eq!(small_alone, 9.820_778_893_648_42, epsilon = 1e-9);
        assert_abs_diff_eq!(
            report.contributions[0].marginal_delta,
            -small_alone,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_value_shares() {
        let assets = vec![AssetParameters::new(1.0, 0.4)];
        let pool = vec![
            Pledge::new(1500.0, vec![1200.0]),
            Pledge::new(1234.0, vec![1888.0]),
            Pledge::new(666.0, vec![888.0]),
        ];
        let report = allocator().report(&pool, &assets).unwrap();

        // Single asset: stressed value is linear in collateral, so shares
        // follow the collateral split.
        let shares = report.value_shares();
        assert_abs_diff_eq!(shares[0], 1200.0 / 3976.0, epsilon = 1e-12);
        assert_abs_diff_eq!(shares[1], 1888.0 / 3976.0, epsilon = 1e-12);
        assert_abs_diff_eq!(shares[2], 888.0 / 3976.0, epsilon = 1e-12);
        assert_abs_diff_eq!(shares.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_validates_every_member_up_front() {
        let assets = vec![AssetParameters::new(1.0, 0.4)];
        let pool = vec![Pledge::new(1.0, vec![1.0]), Pledge::new(1.0, vec![1.0, 1.0])];
        assert!(matches!(
            allocator().report(&pool, &assets),
            Err(RiskError::DimensionMismatch { .. })
        ));

        let pool = vec![Pledge::new(1.0, vec![1.0]), Pledge::new(1.0, vec![-1.0])];
        assert!(matches!(
            allocator().report(&pool, &assets),
            Err(RiskError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let assets = vec![AssetParameters::new(1.5, 0.3), AssetParameters::new(0.8, 0.6)];
        let pool: Vec<Pledge> = (0..200)
            .map(|i| {
                let i = f64::from(i);
                Pledge::new(100.0 + i, vec![40.0 + i % 7.0, 90.0 - i % 11.0])
            })
            .collect();

        let sequential = allocator().report(&pool, &assets).unwrap();
        let parallel = MarginalAllocator::new(
            PortfolioStress::new(StressConfig::new().with_threshold(1)).unwrap(),
        )
        .report(&pool, &assets)
        .unwrap();

        assert_eq!(sequential.contributions, parallel.contributions);
    }
}
