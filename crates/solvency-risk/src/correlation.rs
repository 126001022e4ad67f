//! Asset correlation for multi-asset portfolio variance.

use crate::error::{RiskError, RiskResult};
use nalgebra::{DMatrix, DVector};

const TOLERANCE: f64 = 1e-12;

/// A validated correlation matrix.
///
/// Square, symmetric, with a unit diagonal and off-diagonal entries in
/// `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    matrix: DMatrix<f64>,
}

impl CorrelationMatrix {
    /// Wraps a matrix after checking it is a correlation matrix.
    pub fn new(matrix: DMatrix<f64>) -> RiskResult<Self> {
        let n = matrix.nrows();
        if matrix.ncols() != n {
            return Err(RiskError::dimension_mismatch(
                "correlation matrix columns",
                n,
                matrix.ncols(),
            ));
        }

        for i in 0..n {
            if !((matrix[(i, i)] - 1.0).abs() <= TOLERANCE) {
                return Err(RiskError::invalid_correlation(format!(
                    "diagonal entry ({i}, {i}) is {}, expected 1",
                    matrix[(i, i)]
                )));
            }
            for j in (i + 1)..n {
                let rho = matrix[(i, j)];
                if !(-1.0..=1.0).contains(&rho) {
                    return Err(RiskError::invalid_correlation(format!(
                        "entry ({i}, {j}) = {rho} is outside [-1, 1]"
                    )));
                }
                if !((rho - matrix[(j, i)]).abs() <= TOLERANCE) {
                    return Err(RiskError::invalid_correlation(format!(
                        "entries ({i}, {j}) and ({j}, {i}) differ"
                    )));
                }
            }
        }

        Ok(Self { matrix })
    }

    /// Builds an `n x n` matrix from row-major data.
    pub fn from_row_slice(n: usize, data: &[f64]) -> RiskResult<Self> {
        if data.len() != n * n {
            return Err(RiskError::dimension_mismatch(
                "correlation entries",
                n * n,
                data.len(),
            ));
        }
        Self::new(DMatrix::from_row_slice(n, n, data))
    }

    /// Every pair perfectly correlated (ρ = 1): no diversification benefit.
    #[must_use]
    pub fn perfect(n: usize) -> Self {
        Self {
            matrix: DMatrix::from_element(n, n, 1.0),
        }
    }

    /// Uncorrelated assets.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self {
            matrix: DMatrix::identity(n, n),
        }
    }

    /// Number of assets covered.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Correlation between assets `i` and `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.matrix.get((i, j)).copied()
    }

    /// The underlying matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// `xᵀ ρ x`.
    pub fn quadratic_form(&self, x: &[f64]) -> RiskResult<f64> {
        if x.len() != self.dim() {
            return Err(RiskError::dimension_mismatch(
                "correlation matrix",
                self.dim(),
                x.len(),
            ));
        }
        let v = DVector::from_column_slice(x);
        Ok(v.dot(&(&self.matrix * &v)))
    }
}
