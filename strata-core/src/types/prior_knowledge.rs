//! Prior-knowledge mask forbidding predictor -> target relationships.

use nalgebra::DMatrix;

use crate::errors::ShapeError;

/// Square mask where entry `(target, predictor) == 0` forbids `predictor`
/// from explaining `target`. The diagonal is always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorKnowledge {
    mask: DMatrix<f64>,
}

impl PriorKnowledge {
    /// Copy `matrix` and zero its diagonal.
    pub fn new(matrix: &DMatrix<f64>) -> Result<Self, ShapeError> {
        let (rows, cols) = matrix.shape();
        if rows != cols {
            return Err(ShapeError::NotSquare {
                what: "prior knowledge",
                rows,
                cols,
            });
        }
        let mut mask = matrix.clone();
        mask.fill_diagonal(0.0);
        Ok(Self { mask })
    }

    /// A mask allowing every off-diagonal pair.
    pub fn unconstrained(n: usize) -> Self {
        let mut mask = DMatrix::from_element(n, n, 1.0);
        mask.fill_diagonal(0.0);
        Self { mask }
    }

    /// Mark `predictor -> target` as forbidden.
    pub fn forbid(&mut self, predictor: usize, target: usize) -> Result<(), ShapeError> {
        let n = self.dim();
        for node in [predictor, target] {
            if node >= n {
                return Err(ShapeError::NodeOutOfRange { node, n });
            }
        }
        self.mask[(target, predictor)] = 0.0;
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.mask.nrows()
    }

    /// Whether `predictor` may be used to explain `target`.
    pub fn allows(&self, target: usize, predictor: usize) -> bool {
        self.mask[(target, predictor)] != 0.0
    }

    /// Check the mask matches a data matrix with `n` columns.
    pub fn check_dim(&self, n: usize) -> Result<(), ShapeError> {
        if self.dim() != n {
            return Err(ShapeError::DimensionMismatch {
                what: "prior knowledge",
                expected: n,
                actual: self.dim(),
            });
        }
        Ok(())
    }
}
