//! LARS-Lasso regularization path and information-criterion model selection.
//!
//! The path follows least angle regression with the Lasso modification:
//! an active coefficient that would cross zero leaves the active set, and no
//! variable joins on the following step.

use nalgebra::{DMatrix, DVector};
use strata_core::config::InformationCriterion;
use strata_core::errors::EstimationError;
use tracing::trace;

use crate::ols::{center_columns, least_squares, residual_sum_squares};

/// Breakpoints of the Lasso path, from `alpha_max` (all zero) downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LarsPath {
    /// Regularization strength at each breakpoint, non-increasing.
    pub alphas: Vec<f64>,
    /// Coefficients at each breakpoint.
    pub coefs: Vec<DVector<f64>>,
}

impl LarsPath {
    pub fn len(&self) -> usize {
        self.alphas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alphas.is_empty()
    }
}

/// Compute the Lasso path of `y` on `x` with LARS. Inputs are used as given
/// (no centering); `alpha` is the correlation scale divided by `n_samples`.
pub fn lasso_lars_path(x: &DMatrix<f64>, y: &DVector<f64>, max_iter: usize) -> LarsPath {
    let (n, p) = x.shape();
    let n_samples = n.max(1) as f64;

    let mut beta = DVector::<f64>::zeros(p);
    let mut active: Vec<usize> = Vec::new();
    let mut is_active = vec![false; p];
    let mut path = LarsPath {
        alphas: Vec::new(),
        coefs: Vec::new(),
    };
    let mut dropped = false;
    let mut steps = 0;

    loop {
        let corr = x.tr_mul(&(y - x * &beta));
        let c_max = corr.iter().fold(0.0_f64, |acc, c| acc.max(c.abs()));
        let alpha = c_max / n_samples;
        path.alphas.push(alpha);
        path.coefs.push(beta.clone());

        if alpha <= f64::EPSILON || steps >= max_iter || active.len() >= p {
            break;
        }

        if !dropped {
            let entering = (0..p)
                .filter(|&j| !is_active[j])
                .max_by(|&a, &b| corr[a].abs().total_cmp(&corr[b].abs()));
            match entering {
                Some(j) => {
                    active.push(j);
                    is_active[j] = true;
                }
                None => break,
            }
        }
        dropped = false;

        // Equiangular direction over the sign-adjusted active columns.
        let signs: Vec<f64> = active.iter().map(|&j| sign(corr[j])).collect();
        let x_active = DMatrix::from_fn(n, active.len(), |r, k| x[(r, active[k])] * signs[k]);
        let gram = x_active.tr_mul(&x_active);
        let ones = DVector::from_element(active.len(), 1.0);
        let g_inv_ones = match gram.clone().cholesky() {
            Some(chol) => chol.solve(&ones),
            None => least_squares(&gram, &ones),
        };
        let norm = ones.dot(&g_inv_ones);
        if !(norm.is_finite() && norm > 0.0) {
            break;
        }
        let aa = 1.0 / norm.sqrt();
        let w = g_inv_ones * aa;
        let u = &x_active * &w;
        let a = x.tr_mul(&u);

        // Longest step before an inactive variable ties the active correlation.
        let full_step = c_max / aa;
        let tol = full_step * 1e-10;
        let mut gamma = full_step;
        for j in (0..p).filter(|&j| !is_active[j]) {
            for candidate in [(c_max - corr[j]) / (aa - a[j]), (c_max + corr[j]) / (aa + a[j])] {
                if candidate.is_finite() && candidate > tol && candidate < gamma {
                    gamma = candidate;
                }
            }
        }

        // Lasso modification: stop where an active coefficient hits zero.
        let mut drop_at = None;
        for (k, &j) in active.iter().enumerate() {
            let direction = signs[k] * w[k];
            if direction == 0.0 {
                continue;
            }
            let crossing = -beta[j] / direction;
            if crossing.is_finite() && crossing > tol && crossing < gamma {
                gamma = crossing;
                drop_at = Some(k);
            }
        }

        for (k, &j) in active.iter().enumerate() {
            beta[j] += gamma * signs[k] * w[k];
        }
        steps += 1;

        if let Some(k) = drop_at {
            let j = active.remove(k);
            is_active[j] = false;
            beta[j] = 0.0;
            dropped = true;
            trace!(variable = j, step = steps, "variable left the lasso path");
        }
    }

    path
}

/// Lasso fit whose regularization strength was chosen by an information criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct LassoIcFit {
    /// Coefficients at the selected path point.
    pub coefficients: DVector<f64>,
    pub intercept: f64,
    /// Selected regularization strength.
    pub alpha: f64,
    /// Criterion value at every path point.
    pub criterion: Vec<f64>,
    /// Index of the selected path point.
    pub best: usize,
    /// Residual variance of the full OLS fit used to scale the criterion.
    pub noise_variance: f64,
}

/// Fit the Lasso path of `y` on `x` (both centered internally) and select
/// the point minimizing
/// `n ln(2 pi s2) + RSS_k / s2 + penalty * df_k`,
/// where `s2` is the residual variance of the full OLS fit and `df_k` counts
/// coefficients above machine epsilon. Ties keep the earliest point.
pub fn lasso_lars_ic(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    criterion: InformationCriterion,
    max_iter: usize,
) -> Result<LassoIcFit, EstimationError> {
    let (n, p) = x.shape();
    if n <= p + 1 {
        return Err(EstimationError::InsufficientSamples {
            samples: n,
            predictors: p,
            required: p + 1,
        });
    }

    let (xc, x_means) = center_columns(x);
    let y_mean = y.mean();
    let yc = y.add_scalar(-y_mean);

    let ols = least_squares(&xc, &yc);
    let noise_variance = residual_sum_squares(&xc, &yc, &ols) / (n - p - 1) as f64;
    if noise_variance <= f64::EPSILON * yc.norm_squared() / n as f64 {
        return Err(EstimationError::ZeroNoiseVariance);
    }

    let path = lasso_lars_path(&xc, &yc, max_iter);
    let n_f = n as f64;
    let penalty = criterion.penalty(n);
    let base = n_f * (2.0 * std::f64::consts::PI * noise_variance).ln();
    let values: Vec<f64> = path
        .coefs
        .iter()
        .map(|coef| {
            let rss = residual_sum_squares(&xc, &yc, coef);
            let df = coef.iter().filter(|c| c.abs() > f64::EPSILON).count() as f64;
            base + rss / noise_variance + penalty * df
        })
        .collect();

    let mut best = 0;
    for (k, &value) in values.iter().enumerate() {
        if value < values[best] {
            best = k;
        }
    }
    trace!(
        steps = path.len(),
        best,
        alpha = path.alphas[best],
        criterion = criterion.as_str(),
        "selected lasso path point"
    );

    let coefficients = path.coefs[best].clone();
    let intercept = y_mean - x_means.dot(&coefficients);
    Ok(LassoIcFit {
        coefficients,
        intercept,
        alpha: path.alphas[best],
        criterion: values,
        best,
        noise_variance,
    })
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ols::fit_ols;

    fn design() -> (DMatrix<f64>, DVector<f64>) {
        // Deterministic, well-conditioned design with a sparse truth.
        let n = 60;
        let x = DMatrix::from_fn(n, 3, |i, j| {
            let t = i as f64;
            match j {
                0 => (t * 0.37).sin(),
                1 => (t * 0.91 + 1.0).cos(),
                _ => ((t * 1.7).sin() * 3.1).fract(),
            }
        });
        let y = DVector::from_fn(n, |i, _| {
            3.0 * x[(i, 0)] - 1.5 * x[(i, 1)] + 0.05 * ((i as f64) * 2.3).sin()
        });
        let (xc, _) = center_columns(&x);
        let yc = y.add_scalar(-y.mean());
        (xc, yc)
    }

    #[test]
    fn path_starts_at_alpha_max_with_zero_coefficients() {
        let (x, y) = design();
        let path = lasso_lars_path(&x, &y, 500);
        let alpha_max = x.tr_mul(&y).amax() / x.nrows() as f64;
        assert!((path.alphas[0] - alpha_max).abs() < 1e-12);
        assert!(path.coefs[0].iter().all(|&c| c == 0.0));
    }

    #[test]
    fn alphas_never_increase_and_path_ends_at_ols() {
        let (x, y) = design();
        let path = lasso_lars_path(&x, &y, 500);
        for pair in path.alphas.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-12, "{:?}", path.alphas);
        }
        let last = path.coefs.last().unwrap();
        let ols = least_squares(&x, &y);
        assert!((last - &ols).amax() < 1e-8, "{last} vs {ols}");
    }

    #[test]
    fn single_predictor_path_has_two_points() {
        let x = DMatrix::from_row_slice(4, 1, &[-1.5, -0.5, 0.5, 1.5]);
        let y = DVector::from_row_slice(&[-3.0, -1.0, 1.0, 3.0]);
        let path = lasso_lars_path(&x, &y, 500);
        assert_eq!(path.len(), 2);
        assert!((path.coefs[1][0] - 2.0).abs() < 1e-12);
        assert!(path.alphas[1] < 1e-12);
    }

    #[test]
    fn max_iter_truncates_the_path() {
        let (x, y) = design();
        let path = lasso_lars_path(&x, &y, 1);
        assert_eq!(path.len(), 2);
        assert_eq!(path.coefs[1].iter().filter(|c| **c != 0.0).count(), 1);
    }

    #[test]
    fn zero_design_stops_immediately() {
        let x = DMatrix::<f64>::zeros(5, 2);
        let y = DVector::from_element(5, 1.0);
        let path = lasso_lars_path(&x, &y, 500);
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn information_criterion_keeps_the_true_support() {
        let (x, y) = design();
        let fit = lasso_lars_ic(&x, &y, InformationCriterion::Bic, 500).unwrap();
        assert!(fit.coefficients[0].abs() > 1.0);
        assert!(fit.coefficients[1].abs() > 0.5);
        assert_eq!(fit.criterion.len(), lasso_lars_path(&x, &y, 500).len());
        let min = fit.criterion.iter().cloned().fold(f64::INFINITY, f64::min);
        assert_eq!(fit.criterion[fit.best], min);

        // The lasso L1 norm grows along the path towards the OLS solution.
        let l1 = |v: &DVector<f64>| v.iter().map(|c| c.abs()).sum::<f64>();
        let ols = fit_ols(&x, &y);
        assert!(fit.noise_variance > 0.0);
        assert!(l1(&fit.coefficients) <= l1(&ols.coefficients) + 1e-9);
    }

    #[test]
    fn too_few_samples_is_an_error() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(
            lasso_lars_ic(&x, &y, InformationCriterion::Bic, 500),
            Err(EstimationError::InsufficientSamples {
                samples: 3,
                predictors: 2,
                required: 3
            })
        );
    }

    #[test]
    fn exact_fit_is_reported() {
        let x = DMatrix::from_row_slice(5, 1, &[1.0, 2.0, 3.0, 4.0, 6.0]);
        let y = x.column(0) * 2.0;
        assert_eq!(
            lasso_lars_ic(&x, &y, InformationCriterion::Aic, 500),
            Err(EstimationError::ZeroNoiseVariance)
        );
    }
}
