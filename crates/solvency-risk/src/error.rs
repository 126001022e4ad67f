//! Error types for collateral risk analytics.
//!
//! A valueless portfolio is not an error: it is handled as a regular branch
//! of the shortfall calculation (shortfall equals debt).

use solvency_math::MathError;
use thiserror::Error;

/// Result type for risk operations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during risk calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// A model parameter lies outside its domain (e.g. confidence not in (0, 1)).
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        name: String,
        /// The offending value.
        value: f64,
        /// Description of the valid domain.
        reason: String,
    },

    /// A sequence does not line up with the asset universe.
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// What was being checked.
        context: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Malformed input data (negative amounts, non-positive prices, ...).
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Correlation matrix is not a valid correlation matrix.
    #[error("Invalid correlation matrix: {reason}")]
    InvalidCorrelation {
        /// Description of the violation.
        reason: String,
    },
}

impl RiskError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create an invalid correlation error.
    #[must_use]
    pub fn invalid_correlation(reason: impl Into<String>) -> Self {
        Self::InvalidCorrelation {
            reason: reason.into(),
        }
    }
}

impl From<MathError> for RiskError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InvalidParameter {
                name,
                value,
                reason,
            } => Self::InvalidParameter {
                name,
                value,
                reason,
            },
            MathError::DimensionMismatch { expected, actual } => Self::DimensionMismatch {
                context: "math".to_string(),
                expected,
                actual,
            },
            MathError::InvalidInput { reason } => Self::InvalidInput { reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RiskError::invalid_parameter("confidence", 1.2, "must lie in (0, 1)");
        assert!(err.to_string().contains("confidence = 1.2"));

        let err = RiskError::dimension_mismatch("pledge 3 collateral", 2, 1);
        assert!(err.to_string().contains("pledge 3 collateral"));
        assert!(err.to_string().contains("expected 2, got 1"));

        let err = RiskError::invalid_input("negative debt");
        assert!(err.to_string().contains("negative debt"));
    }

    #[test]
    fn test_from_math_error() {
        let err: RiskError = MathError::invalid_parameter("p", 0.0, "out of range").into();
        assert!(matches!(
            err,
            RiskError::InvalidParameter { ref name, .. } if name == "p"
        ));

        let err: RiskError = MathError::dimension_mismatch(4, 3).into();
        assert!(matches!(
            err,
            RiskError::DimensionMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }
}
