//! Stress testing of collateral portfolios.
//!
//! This module provides:
//! - A CVaR-style stress model turning volatility into a fractional loss
//! - Pledge-level stressed value and shortfall against debt
//! - Tail (90%) and average (50%) scenarios
//!
//! All calculations are pure functions of the pledge, the asset universe and
//! the configuration. Nothing is cached between calls.

mod model;
mod portfolio;

pub use model::*;
pub use portfolio::*;
