//! Per-call column standardization (zero mean, unit population variance).
//!
//! Scaling parameters are computed fresh on every call and never cached.

use nalgebra::DMatrix;
use statrs::statistics::Statistics;
use strata_core::errors::EstimationError;

/// Mean and scale of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnScaling {
    pub mean: f64,
    pub scale: f64,
}

/// Compute the scaling of `column`, rejecting non-finite values and
/// constant columns.
///
/// A column counts as constant when its variance is within floating-point
/// error of zero: `var <= n * eps * var + (n * mean * eps)^2`.
pub fn column_scaling(data: &DMatrix<f64>, column: usize) -> Result<ColumnScaling, EstimationError> {
    let values = data.column(column);
    if let Some(row) = values.iter().position(|v| !v.is_finite()) {
        return Err(EstimationError::NonFiniteValue { row, column });
    }

    let n = values.len() as f64;
    let mean = values.iter().mean();
    let var = values.iter().population_variance();
    let eps = f64::EPSILON;
    let upper_bound = n * eps * var + (n * mean * eps).powi(2);
    if values.is_empty() || !(var > upper_bound) {
        return Err(EstimationError::DegenerateInput { column });
    }

    Ok(ColumnScaling {
        mean,
        scale: var.sqrt(),
    })
}

/// Standardize the listed columns of `data` into a new `n_samples x columns.len()` matrix.
pub fn standardize_columns(
    data: &DMatrix<f64>,
    columns: &[usize],
) -> Result<DMatrix<f64>, EstimationError> {
    let mut out = data.select_columns(columns);
    for (j, &column) in columns.iter().enumerate() {
        let scaling = column_scaling(data, column)?;
        out.column_mut(j)
            .apply(|v| *v = (*v - scaling.mean) / scaling.scale);
    }
    Ok(out)
}

/// First non-finite cell of `data`, scanning column by column.
pub fn check_finite(data: &DMatrix<f64>) -> Result<(), EstimationError> {
    for (column, values) in data.column_iter().enumerate() {
        if let Some(row) = values.iter().position(|v| !v.is_finite()) {
            return Err(EstimationError::NonFiniteValue { row, column });
        }
    }
    Ok(())
}
