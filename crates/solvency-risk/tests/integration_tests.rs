//! Integration tests for solvency-risk.
//!
//! These tests verify end-to-end functionality on a small lending pool.

use approx::assert_abs_diff_eq;
use solvency_risk::prelude::*;
use solvency_risk::types::aggregate;

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// One collateral asset at price 1 with 40% volatility.
fn collateral_universe() -> Vec<AssetParameters> {
    vec![AssetParameters::new(1.0, 0.4)]
}

/// Three undercollateralized borrowers sharing one asset.
fn lending_pool() -> Vec<Pledge> {
    vec![
        Pledge::new(1500.0, vec![1200.0]),
        Pledge::new(1234.0, vec![1888.0]),
        Pledge::new(666.0, vec![888.0]),
    ]
}

fn allocator() -> MarginalAllocator {
    MarginalAllocator::new(PortfolioStress::new(StressConfig::sequential()).unwrap())
}

// =============================================================================
// POOL SHORTFALL
// =============================================================================

#[test]
fn test_pool_shortfall() {
    let assets = collateral_universe();
    let pool = aggregate(&lending_pool(), assets.len()).unwrap();
    assert_eq!(pool.debt, 3400.0);
    assert_eq!(pool.collateral, vec![3976.0]);

    let result = evaluate(&pool, &assets).unwrap();
    assert_abs_diff_eq!(result.volatility, 0.96_f64.sqrt(), epsilon = 1e-15);
    assert_abs_diff_eq!(result.stress_fraction, 0.820_778_893_648_420_2, epsilon = 1e-9);
    assert_abs_diff_eq!(result.stressed_value, 712.583_118_853_881_4, epsilon = 1e-9);
    assert_abs_diff_eq!(result.shortfall, 2687.416_881_146_118_6, epsilon = 1e-9);
}

#[test]
fn test_member_shortfalls() {
    let assets = collateral_universe();
    let expected = [
        1284.934_672_378_104_1,
        895.630_551_208_217_2,
        506.851_657_559_797_1,
    ];

    for (pledge, shortfall) in lending_pool().iter().zip(expected) {
        let result = evaluate(pledge, &assets).unwrap();
        assert_abs_diff_eq!(result.shortfall, shortfall, epsilon = 1e-9);
        assert!(result.is_short());
    }
}

// =============================================================================
// CONTRIBUTIONS
// =============================================================================

#[test]
fn test_contribution_report() {
    let assets = collateral_universe();
    let pool = lending_pool();
    let report = allocator().report(&pool, &assets).unwrap();

    assert_abs_diff_eq!(report.pool.shortfall, 2687.416_881_146_118_6, epsilon = 1e-9);
    assert_eq!(report.contributions.len(), pool.len());

    for (pledge, contribution) in pool.iter().zip(&report.contributions) {
        let standalone = evaluate(pledge, &assets).unwrap();
        assert_abs_diff_eq!(
            contribution.standalone_shortfall,
            standalone.shortfall,
            epsilon = 1e-12
        );

        // Every member here is short on its own; its delta is positive and
        // of the same order as its standalone shortfall.
        assert!(contribution.marginal_delta.is_finite());
        assert!(contribution.marginal_delta > 0.0);
        assert!(contribution.marginal_delta < 2.0 * contribution.standalone_shortfall);
    }

    assert_abs_diff_eq!(
        report.standalone_tally,
        report.contributions.iter().map(|c| c.standalone_shortfall).sum::<f64>(),
        epsilon = 1e-9
    );
    assert!(report.additivity_gap().is_finite());
}

#[test]
fn test_contributions_follow_input_order() {
    let assets = collateral_universe();
    let mut pool = lending_pool();
    let forward = compute_contributions(&pool, &assets).unwrap();

    pool.reverse();
    let reversed = compute_contributions(&pool, &assets).unwrap();

    for (a, b) in forward.iter().zip(reversed.iter().rev()) {
        assert_abs_diff_eq!(a.standalone_shortfall, b.standalone_shortfall, epsilon = 1e-12);
        assert_abs_diff_eq!(a.marginal_delta, b.marginal_delta, epsilon = 1e-9);
    }
}

#[test]
fn test_multi_asset_pool_with_correlation() {
    let assets = vec![AssetParameters::new(2.0, 0.5), AssetParameters::new(4.0, 0.2)];
    let pool = vec![
        Pledge::new(300.0, vec![100.0, 50.0]),
        Pledge::new(120.0, vec![10.0, 60.0]),
        Pledge::new(80.0, vec![70.0, 0.0]),
    ];

    let perfect = allocator().report(&pool, &assets).unwrap();
    let rho = CorrelationMatrix::from_row_slice(2, &[1.0, 0.2, 0.2, 1.0]).unwrap();
    let diversified = MarginalAllocator::new(
        PortfolioStress::new(StressConfig::sequential())
            .unwrap()
            .with_correlation(rho),
    )
    .report(&pool, &assets)
    .unwrap();

    assert!(diversified.pool.volatility < perfect.pool.volatility);
    assert!(diversified.pool.shortfall <= perfect.pool.shortfall);
}

// =============================================================================
// SCENARIOS AND EXPOSURE
// =============================================================================

#[test]
fn test_scenario_report() {
    let assets = collateral_universe();
    let stress = PortfolioStress::new(StressConfig::default()).unwrap();
    let report = stress
        .evaluate_scenarios(&Pledge::new(1500.0, vec![1200.0]), &assets)
        .unwrap();

    let tail = evaluate(&Pledge::new(1500.0, vec![1200.0]), &assets).unwrap();
    assert_eq!(report.tail, tail);
    assert!(report.average.shortfall < report.tail.shortfall);
    assert!(report.average.stressed_value > report.tail.stressed_value);
}

#[test]
fn test_short_exposure_loses_all_collateral() {
    let assets = collateral_universe();
    let stress =
        PortfolioStress::new(StressConfig::new().with_exposure(Exposure::Short)).unwrap();
    let result = stress
        .evaluate(&Pledge::new(666.0, vec![888.0]), &assets)
        .unwrap();

    assert!(result.stress_fraction > 1.0);
    assert_eq!(result.stressed_value, 0.0);
    assert_eq!(result.shortfall, 666.0);
}

// =============================================================================
// ERROR PATHS
// =============================================================================

#[test]
fn test_error_paths() {
    let assets = collateral_universe();

    assert!(matches!(
        evaluate(&Pledge::new(100.0, vec![1.0, 2.0]), &assets),
        Err(RiskError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        evaluate(&Pledge::new(100.0, vec![-5.0]), &assets),
        Err(RiskError::InvalidInput { .. })
    ));
    assert!(matches!(
        evaluate(&Pledge::new(100.0, vec![5.0]), &[AssetParameters::new(1.0, -0.1)]),
        Err(RiskError::InvalidInput { .. })
    ));
    assert!(matches!(
        stress(0.0, 0.4, Exposure::Long),
        Err(RiskError::InvalidParameter { .. })
    ));

    let mut pool = lending_pool();
    pool.push(Pledge::new(10.0, vec![]));
    assert!(matches!(
        compute_contributions(&pool, &assets),
        Err(RiskError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_config_serde_round_trip() {
    let config = StressConfig::for_scenario(StressScenario::Average)
        .with_exposure(Exposure::Short)
        .with_threshold(8);

    let json = serde_json::to_string(&config).unwrap();
    let parsed: StressConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
    assert_eq!(parsed.confidence, 0.50);
}
