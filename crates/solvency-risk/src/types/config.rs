//! Configuration for collateral stress computation.

use crate::error::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

/// Confidence level of the collateral stress scenario (10% worst outcomes).
pub const TAIL_CONFIDENCE: f64 = 0.90;

/// Confidence level of the average stress scenario.
pub const AVERAGE_CONFIDENCE: f64 = 0.50;

/// Direction of the exposure being stressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Exposure {
    /// Holder loses when the price falls; loss is capped at 100%.
    #[default]
    Long,

    /// Holder loses when the price rises; loss is uncapped.
    Short,
}

/// Named stress scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum StressScenario {
    /// Expected loss over the worst 10% of outcomes.
    #[default]
    Tail,

    /// Expected loss over the worst half of outcomes.
    Average,
}

impl StressScenario {
    /// Confidence level of the scenario.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Tail => TAIL_CONFIDENCE,
            Self::Average => AVERAGE_CONFIDENCE,
        }
    }
}

/// Configuration for stress and contribution computation.
///
/// Controls the scenario and parallelism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressConfig {
    /// Confidence level `α` in `(0, 1)`.
    pub confidence: f64,

    /// Direction applied to collateral value.
    pub exposure: Exposure,

    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum pool size to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            confidence: TAIL_CONFIDENCE,
            exposure: Exposure::Long,
            parallel: true,
            parallel_threshold: 64,
        }
    }
}

impl StressConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Creates a config for a named scenario.
    #[must_use]
    pub fn for_scenario(scenario: StressScenario) -> Self {
        Self::default().with_confidence(scenario.confidence())
    }

    /// Sets the confidence level.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Sets the exposure direction.
    #[must_use]
    pub fn with_exposure(mut self, exposure: Exposure) -> Self {
        self.exposure = exposure;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Rejects a confidence level outside `(0, 1)`.
    pub fn validate(&self) -> RiskResult<()> {
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(RiskError::invalid_parameter(
                "confidence",
                self.confidence,
                "confidence level must lie strictly between 0 and 1",
            ));
        }
        Ok(())
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}
