//! Contribution analysis for pledge pools.
//!
//! Provides each pledge's standalone shortfall and its leave-one-out effect
//! on the pool's aggregate shortfall.
//!
//! # Example
//!
//! ```rust
//! use solvency_risk::contribution::compute_contributions;
//! use solvency_risk::types::{AssetParameters, Pledge};
//!
//! let assets = vec![AssetParameters::new(1.0, 0.4)];
//! let pool = vec![
//!     Pledge::new(1500.0, vec![1200.0]),
//!     Pledge::new(666.0, vec![888.0]),
//! ];
//!
//! let contributions = compute_contributions(&pool, &assets).unwrap();
//! assert_eq!(contributions.len(), 2);
//! ```

mod marginal;

pub use marginal::*;
