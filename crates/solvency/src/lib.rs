//! # Solvency
//!
//! Collateral risk analytics for lending pools.
//!
//! This facade re-exports the numerical layer ([`math`]) and the risk layer
//! ([`risk`]) so that applications depend on a single crate.
//!
//! ```rust
//! use solvency::prelude::*;
//!
//! let assets = vec![AssetParameters::new(1.0, 0.4)];
//! let pool = vec![
//!     Pledge::new(1500.0, vec![1200.0]),
//!     Pledge::new(1234.0, vec![1888.0]),
//! ];
//!
//! let contributions = compute_contributions(&pool, &assets).unwrap();
//! assert_eq!(contributions.len(), 2);
//! assert!(normal_quantile(0.9).unwrap() > 1.28);
//! ```

#![warn(missing_docs)]

pub use solvency_math as math;
pub use solvency_risk as risk;

pub use solvency_math::{MathError, MathResult};
pub use solvency_risk::{RiskError, RiskResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use solvency_math::prelude::*;
    pub use solvency_risk::prelude::*;
}
