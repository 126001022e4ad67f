//! Pledges, asset parameters and pool aggregation.

use crate::error::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

/// Market parameters of one collateral asset.
///
/// A slice of these is the asset universe: index `i` describes the asset held
/// in `collateral[i]` of every pledge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetParameters {
    /// Price per unit of the asset (must be positive).
    pub price: f64,

    /// Volatility of the asset, as a decimal (0.4 for 40%).
    pub volatility: f64,
}

impl AssetParameters {
    /// Creates new asset parameters.
    #[must_use]
    pub fn new(price: f64, volatility: f64) -> Self {
        Self { price, volatility }
    }

    /// Checks price and volatility.
    pub fn validate(&self) -> RiskResult<()> {
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(RiskError::invalid_input(format!(
                "asset price must be positive, got {}",
                self.price
            )));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(RiskError::invalid_input(format!(
                "asset volatility must be non-negative, got {}",
                self.volatility
            )));
        }
        Ok(())
    }
}

/// Validates every entry of an asset universe.
pub fn validate_assets(assets: &[AssetParameters]) -> RiskResult<()> {
    assets.iter().try_for_each(AssetParameters::validate)
}

/// A collateralized position: a debt backed by holdings in each asset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pledge {
    /// Amount owed.
    pub debt: f64,

    /// Units held of each asset, index-aligned with the asset universe.
    pub collateral: Vec<f64>,
}

impl Pledge {
    /// Creates a new pledge.
    #[must_use]
    pub fn new(debt: f64, collateral: Vec<f64>) -> Self {
        Self { debt, collateral }
    }

    /// Creates a pledge with no debt and no collateral over `asset_count` assets.
    #[must_use]
    pub fn empty(asset_count: usize) -> Self {
        Self {
            debt: 0.0,
            collateral: vec![0.0; asset_count],
        }
    }

    /// Checks the pledge against an asset universe of `asset_count` assets.
    ///
    /// The length check runs first so that a misaligned pledge is rejected
    /// before any amount is inspected.
    pub fn validate(&self, asset_count: usize) -> RiskResult<()> {
        if self.collateral.len() != asset_count {
            return Err(RiskError::dimension_mismatch(
                "pledge collateral",
                asset_count,
                self.collateral.len(),
            ));
        }
        if !(self.debt.is_finite() && self.debt >= 0.0) {
            return Err(RiskError::invalid_input(format!(
                "debt must be non-negative, got {}",
                self.debt
            )));
        }
        if let Some((i, amount)) = self
            .collateral
            .iter()
            .enumerate()
            .find(|(_, a)| !(a.is_finite() && **a >= 0.0))
        {
            return Err(RiskError::invalid_input(format!(
                "collateral amount for asset {i} must be non-negative, got {amount}"
            )));
        }
        Ok(())
    }

    /// Per-asset market values `collateral[i] * price[i]`.
    ///
    /// Assumes the pledge has been validated against `assets`.
    #[must_use]
    pub fn values(&self, assets: &[AssetParameters]) -> Vec<f64> {
        self.collateral
            .iter()
            .zip(assets)
            .map(|(amount, asset)| amount * asset.price)
            .collect()
    }

    /// Total market value of the collateral.
    pub fn total_value(&self, assets: &[AssetParameters]) -> RiskResult<f64> {
        self.validate(assets.len())?;
        Ok(self.values(assets).iter().sum())
    }

    /// Collateralization ratio: collateral value over debt.
    ///
    /// - `debt > 0`: `value / debt` (0 when there is no collateral)
    /// - `debt = 0`, `value > 0`: `f64::INFINITY`
    /// - both zero: 0
    pub fn collateralization_ratio(&self, assets: &[AssetParameters]) -> RiskResult<f64> {
        validate_assets(assets)?;
        let value = self.total_value(assets)?;

        if self.debt > 0.0 {
            Ok(value / self.debt)
        } else if value > 0.0 {
            Ok(f64::INFINITY)
        } else {
            Ok(0.0)
        }
    }
}

impl Pledge {
    fn accumulate(&mut self, other: &Pledge) {
        self.debt += other.debt;
        for (total, amount) in self.collateral.iter_mut().zip(&other.collateral) {
            *total += amount;
        }
    }
}

/// Element-wise sum of debt and collateral across `pledges`.
///
/// The pool is a view: it is recomputed from its members and never mutated
/// on its own. An empty slice aggregates to [`Pledge::empty`].
pub fn aggregate(pledges: &[Pledge], asset_count: usize) -> RiskResult<Pledge> {
    let mut pool = Pledge::empty(asset_count);
    for pledge in pledges {
        pledge.validate(asset_count)?;
        pool.accumulate(pledge);
    }
    Ok(pool)
}

/// For each member `m`, the aggregate of every other member.
///
/// Built from prefix and suffix sums, `prefix[m] + suffix[m + 1]`, so the
/// result never subtracts a member back out of the pool totals. A large
/// member cannot wash the small ones out of its own complement.
pub fn leave_one_out(pledges: &[Pledge], asset_count: usize) -> RiskResult<Vec<Pledge>> {
    for pledge in pledges {
        pledge.validate(asset_count)?;
    }

    // suffixes[i] = aggregate(pledges[i..])
    let mut running = Pledge::empty(asset_count);
    let mut suffixes = Vec::with_capacity(pledges.len() + 1);
    suffixes.push(running.clone());
    for pledge in pledges.iter().rev() {
        running.accumulate(pledge);
        suffixes.push(running.clone());
    }
    suffixes.reverse();

    let mut prefix = Pledge::empty(asset_count);
    let mut rests = Vec::with_capacity(pledges.len());
    for (pledge, suffix) in pledges.iter().zip(suffixes.iter().skip(1)) {
        let mut rest = prefix.clone();
        rest.accumulate(suffix);
        rests.push(rest);
        prefix.accumulate(pledge);
    }
    Ok(rests)
}
