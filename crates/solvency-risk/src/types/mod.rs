//! Core types for collateral risk analytics.

mod config;
mod pledge;
mod results;

pub use config::{
    Exposure, StressConfig, StressScenario, AVERAGE_CONFIDENCE, TAIL_CONFIDENCE,
};
pub use pledge::{aggregate, leave_one_out, validate_assets, AssetParameters, Pledge};
pub use results::{
    ContributionReport, ContributionResult, ScenarioReport, ShortfallResult, StressResult,
};
