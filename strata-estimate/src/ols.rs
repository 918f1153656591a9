//! Ordinary least squares via SVD (minimum-norm solution when rank deficient).

use nalgebra::{DMatrix, DVector};

/// Coefficients and intercept of an OLS fit.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub coefficients: DVector<f64>,
    pub intercept: f64,
}

/// Solve `min ||x b - y||` without an intercept.
///
/// Singular values below `eps * max(n, p) * s_max` are treated as zero, so
/// collinear designs get the minimum-norm solution.
pub fn least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> DVector<f64> {
    let (n, p) = x.shape();
    if p == 0 || n == 0 {
        return DVector::zeros(p);
    }
    let svd = x.clone().svd(true, true);
    let s_max = svd.singular_values.max();
    let tol = s_max * f64::EPSILON * n.max(p) as f64;
    // U and V^T are always requested above, so solve cannot fail.
    svd.solve(y, tol).unwrap_or_else(|_| DVector::zeros(p))
}

/// OLS with an intercept: center, solve, recover the intercept.
pub fn fit_ols(x: &DMatrix<f64>, y: &DVector<f64>) -> OlsFit {
    let (x_centered, x_means) = center_columns(x);
    let y_mean = y.mean();
    let y_centered = y.add_scalar(-y_mean);
    let coefficients = least_squares(&x_centered, &y_centered);
    let intercept = y_mean - x_means.dot(&coefficients);
    OlsFit {
        coefficients,
        intercept,
    }
}

/// Subtract each column's mean; returns the centered copy and the means.
pub fn center_columns(x: &DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
    let means = DVector::from_iterator(x.ncols(), x.column_iter().map(|c| c.mean()));
    let mut centered = x.clone();
    for (j, mut col) in centered.column_iter_mut().enumerate() {
        col.add_scalar_mut(-means[j]);
    }
    (centered, means)
}

/// `||y - x b||^2`.
pub fn residual_sum_squares(x: &DMatrix<f64>, y: &DVector<f64>, coefficients: &DVector<f64>) -> f64 {
    (y - x * coefficients).norm_squared()
}
