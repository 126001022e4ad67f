//! # Solvency Risk
//!
//! Collateral stress testing and shortfall analytics for pledge pools.
//!
//! A pledge is a debt backed by quantities of collateral assets. This crate
//! stresses the market value of that collateral at a confidence level,
//! compares the stressed value with the debt, and attributes pool-level
//! shortfall to individual members.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Every result is a function of the pledge, the asset
//!   universe and the configuration
//! - **Validate up front**: Inputs are checked before any arithmetic
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use solvency_risk::prelude::*;
//!
//! let assets = vec![AssetParameters::new(1.0, 0.4)];
//! let pledge = Pledge::new(1500.0, vec![1200.0]);
//!
//! let result = evaluate(&pledge, &assets).unwrap();
//! assert!(result.shortfall > 0.0);
//! assert!(result.stressed_value < 1200.0);
//! ```
//!
//! ## Module Overview
//!
//! - [`stress`](mod@stress) - Stress model and pledge-level shortfall
//! - [`contribution`] - Leave-one-out contributions to pool shortfall
//! - [`correlation`] - Asset correlation for multi-asset variance
//! - [`premium`] - Premium rate for insuring a position
//! - [`types`] - Pledges, asset parameters, configuration and results
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Fan out contribution analysis with rayon for large pools

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod contribution;
pub mod correlation;
pub mod error;
pub mod parallel;
pub mod premium;
pub mod stress;
pub mod types;

pub use error::{RiskError, RiskResult};

pub use types::{
    aggregate, leave_one_out, validate_assets, AssetParameters, ContributionReport,
    ContributionResult, Exposure, Pledge, ScenarioReport, ShortfallResult, StressConfig,
    StressResult, StressScenario, AVERAGE_CONFIDENCE, TAIL_CONFIDENCE,
};

pub use correlation::CorrelationMatrix;
pub use stress::{evaluate, stress, PortfolioStress, StressModel};
pub use contribution::{compute_contributions, MarginalAllocator};
pub use parallel::maybe_parallel_map;
pub use premium::{premium_rate, PremiumModel, MAX_PREMIUM_RATE, MIN_PREMIUM_RATE};

/// Prelude module for convenient imports.
///
/// ```rust
/// use solvency_risk::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{RiskError, RiskResult};

    // Inputs and configuration
    pub use crate::types::{AssetParameters, Exposure, Pledge, StressConfig, StressScenario};

    // Results
    pub use crate::types::{
        ContributionReport, ContributionResult, ScenarioReport, ShortfallResult, StressResult,
    };

    // Evaluators
    pub use crate::contribution::{compute_contributions, MarginalAllocator};
    pub use crate::correlation::CorrelationMatrix;
    pub use crate::premium::{premium_rate, PremiumModel};
    pub use crate::stress::{evaluate, stress, PortfolioStress, StressModel};
}
