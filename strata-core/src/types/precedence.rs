//! Binary precedence matrix: `(i, j) = 1` means node `j` precedes node `i`.

use nalgebra::DMatrix;

use crate::errors::ShapeError;

/// Square binary matrix over `n` nodes with a zero diagonal.
///
/// Rows are effects, columns are causes. Any nonzero input entry becomes an
/// edge, so in-degree counts and edge lookups always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceMatrix {
    edges: DMatrix<u8>,
}

impl PrecedenceMatrix {
    /// Build from a real-valued square matrix. The input is copied.
    pub fn new(matrix: &DMatrix<f64>) -> Result<Self, ShapeError> {
        let (rows, cols) = matrix.shape();
        if rows != cols {
            return Err(ShapeError::NotSquare {
                what: "precedence matrix",
                rows,
                cols,
            });
        }
        let edges = DMatrix::from_fn(rows, cols, |i, j| u8::from(i != j && matrix[(i, j)] != 0.0));
        Ok(Self { edges })
    }

    /// Build from row slices of integers, e.g. a loaded `0/1` table.
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let n = rows.len();
        for row in rows {
            let cols = row.as_ref().len();
            if cols != n {
                return Err(ShapeError::NotSquare {
                    what: "precedence matrix",
                    rows: n,
                    cols,
                });
            }
        }
        let edges = DMatrix::from_fn(n, n, |i, j| u8::from(i != j && rows[i].as_ref()[j] != 0));
        Ok(Self { edges })
    }

    /// Build from `(cause, effect)` pairs over `n` nodes. Self-edges are dropped.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self, ShapeError> {
        let mut matrix = DMatrix::<u8>::zeros(n, n);
        for &(cause, effect) in edges {
            for node in [cause, effect] {
                if node >= n {
                    return Err(ShapeError::NodeOutOfRange { node, n });
                }
            }
            if cause != effect {
                matrix[(effect, cause)] = 1;
            }
        }
        Ok(Self { edges: matrix })
    }

    /// Number of nodes.
    pub fn dim(&self) -> usize {
        self.edges.nrows()
    }

    /// Whether `cause` directly precedes `effect`.
    pub fn has_edge(&self, cause: usize, effect: usize) -> bool {
        self.edges[(effect, cause)] != 0
    }

    /// Number of direct causes of `node` (its row sum).
    pub fn in_degree(&self, node: usize) -> usize {
        self.edges.row(node).iter().filter(|&&e| e != 0).count()
    }

    /// Direct effects of `cause`, ascending.
    pub fn effects_of(&self, cause: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.dim()).filter(move |&effect| self.edges[(effect, cause)] != 0)
    }

    /// All `(cause, effect)` edges in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.dim();
        (0..n).flat_map(move |effect| {
            (0..n)
                .filter(move |&cause| self.has_edge(cause, effect))
                .map(move |cause| (cause, effect))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|&&e| e != 0).count()
    }

    /// The matrix as `0.0/1.0` values.
    pub fn to_f64(&self) -> DMatrix<f64> {
        self.edges.map(f64::from)
    }
}
