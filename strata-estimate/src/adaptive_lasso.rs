//! Adaptive Lasso for one target: standardize, weight, select, refit.

use nalgebra::DMatrix;
use strata_core::config::EstimatorConfig;
use strata_core::errors::{ShapeError, StrataError};
use strata_core::types::validate_nodes;

use crate::lars::lasso_lars_ic;
use crate::ols::fit_ols;
use crate::standardize::standardize_columns;

/// Outcome of fitting one target on its candidate predictors.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorFit {
    /// One coefficient per predictor, on the original data scale.
    pub coefficients: Vec<f64>,
    /// Which predictors survived the weighted Lasso.
    pub selected: Vec<bool>,
    /// Regularization strength picked by the information criterion.
    pub alpha: f64,
}

impl PredictorFit {
    fn empty(predictors: usize) -> Self {
        Self {
            coefficients: vec![0.0; predictors],
            selected: vec![false; predictors],
            alpha: 0.0,
        }
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }
}

/// Fit `target` on `predictors` with the default criterion (BIC) and step limit.
pub fn fit_predictors(
    data: &DMatrix<f64>,
    predictors: &[usize],
    target: usize,
    gamma: f64,
) -> Result<PredictorFit, StrataError> {
    let config = EstimatorConfig {
        gamma: Some(gamma),
        ..Default::default()
    };
    fit_predictors_with(data, predictors, target, &config)
}

/// Fit `target` on `predictors` using `config` for gamma, criterion, and step limit.
///
/// 1. Standardize the involved columns.
/// 2. OLS on the standardized data gives initial coefficients `b`.
/// 3. Weights `w = |b|^gamma`.
/// 4. LARS-Lasso on `X_std * w`, path point chosen by the criterion.
/// 5. Keep predictors with `|coef * w| > 0`.
/// 6. Refit OLS on the original columns of the kept predictors.
pub fn fit_predictors_with(
    data: &DMatrix<f64>,
    predictors: &[usize],
    target: usize,
    config: &EstimatorConfig,
) -> Result<PredictorFit, StrataError> {
    config.validate()?;
    let n_features = data.ncols();
    validate_nodes(predictors, n_features)?;
    if target >= n_features {
        return Err(ShapeError::NodeOutOfRange {
            node: target,
            n: n_features,
        }
        .into());
    }
    if predictors.contains(&target) {
        return Err(ShapeError::DuplicateNode { node: target }.into());
    }
    if predictors.is_empty() {
        return Ok(PredictorFit::empty(0));
    }

    let k = predictors.len();
    let mut columns = predictors.to_vec();
    columns.push(target);
    let standardized = standardize_columns(data, &columns)?;
    let x_std = standardized.columns(0, k).into_owned();
    let y_std = standardized.column(k).into_owned();

    let gamma = config.effective_gamma();
    let initial = fit_ols(&x_std, &y_std);
    let weights: Vec<f64> = initial
        .coefficients
        .iter()
        .map(|b| b.abs().powf(gamma))
        .collect();

    let mut x_weighted = x_std;
    for (j, mut col) in x_weighted.column_iter_mut().enumerate() {
        col *= weights[j];
    }
    let lasso = lasso_lars_ic(
        &x_weighted,
        &y_std,
        config.effective_criterion(),
        config.effective_max_iter(),
    )?;

    let selected: Vec<bool> = (0..k)
        .map(|j| (lasso.coefficients[j] * weights[j]).abs() > 0.0)
        .collect();

    let mut fit = PredictorFit::empty(k);
    fit.alpha = lasso.alpha;
    let kept: Vec<usize> = (0..k).filter(|&j| selected[j]).collect();
    if !kept.is_empty() {
        let kept_columns: Vec<usize> = kept.iter().map(|&j| predictors[j]).collect();
        let x_raw = data.select_columns(&kept_columns);
        let y_raw = data.column(target).into_owned();
        let refit = fit_ols(&x_raw, &y_raw);
        for (pos, &j) in kept.iter().enumerate() {
            fit.coefficients[j] = refit.coefficients[pos];
        }
    }
    fit.selected = selected;
    Ok(fit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::errors::{ConfigError, EstimationError};

    fn two_cause_data() -> DMatrix<f64> {
        // x2 = 1.5 x0 - 0.8 x1 + small deterministic noise; x3 unrelated.
        DMatrix::from_fn(80, 4, |i, j| {
            let t = i as f64;
            let x0 = (t * 0.43).sin();
            let x1 = (t * 0.77 + 0.3).cos();
            let x3 = (t * 1.91 + 2.0).sin() * (t * 0.13).cos();
            match j {
                0 => x0,
                1 => x1,
                2 => 1.5 * x0 - 0.8 * x1 + 0.02 * (t * 3.7).sin() + 4.0,
                _ => x3,
            }
        })
    }

    #[test]
    fn recovers_original_scale_coefficients() {
        let data = two_cause_data();
        let fit = fit_predictors(&data, &[0, 1], 2, 1.0).unwrap();
        assert_eq!(fit.selected, vec![true, true]);
        assert!((fit.coefficients[0] - 1.5).abs() < 0.05);
        assert!((fit.coefficients[1] + 0.8).abs() < 0.05);
    }

    #[test]
    fn coefficients_align_with_predictor_order() {
        let data = two_cause_data();
        let fit = fit_predictors(&data, &[1, 0], 2, 1.0).unwrap();
        assert!((fit.coefficients[0] + 0.8).abs() < 0.05);
        assert!((fit.coefficients[1] - 1.5).abs() < 0.05);
    }

    #[test]
    fn empty_predictor_set_is_not_an_error() {
        let data = two_cause_data();
        let fit = fit_predictors(&data, &[], 2, 1.0).unwrap();
        assert!(fit.coefficients.is_empty());
        assert_eq!(fit.selected_count(), 0);
    }

    #[test]
    fn unselected_predictors_get_zero() {
        let data = two_cause_data();
        let fit = fit_predictors(&data, &[0, 1, 3], 2, 1.0).unwrap();
        for (j, &coef) in fit.coefficients.iter().enumerate() {
            if !fit.selected[j] {
                assert_eq!(coef, 0.0);
            }
        }
        assert!(fit.selected[0] && fit.selected[1]);
    }

    #[test]
    fn constant_predictor_is_degenerate() {
        let mut data = two_cause_data();
        data.column_mut(3).fill(2.0);
        let err = fit_predictors(&data, &[0, 3], 2, 1.0).unwrap_err();
        assert!(matches!(
            err,
            StrataError::Estimation(EstimationError::DegenerateInput { column: 3 })
        ));
    }

    #[test]
    fn bad_indices_are_shape_errors() {
        let data = two_cause_data();
        assert!(matches!(
            fit_predictors(&data, &[0, 9], 2, 1.0),
            Err(StrataError::Shape(ShapeError::NodeOutOfRange { node: 9, n: 4 }))
        ));
        assert!(matches!(
            fit_predictors(&data, &[0, 2], 2, 1.0),
            Err(StrataError::Shape(ShapeError::DuplicateNode { node: 2 }))
        ));
        assert!(matches!(
            fit_predictors(&data, &[0], 4, 1.0),
            Err(StrataError::Shape(ShapeError::NodeOutOfRange { node: 4, n: 4 }))
        ));
    }

    #[test]
    fn non_positive_or_non_finite_gamma_is_rejected() {
        let data = two_cause_data();
        for gamma in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            let err = fit_predictors(&data, &[0, 1], 2, gamma).unwrap_err();
            assert!(
                matches!(err, StrataError::Config(ConfigError::ValidationFailed { ref field, .. }) if field == "estimator.gamma"),
                "gamma {gamma}: {err}"
            );
        }
        assert!(fit_predictors(&data, &[0, 1], 2, 0.5).is_ok());
    }

    #[test]
    fn data_is_not_mutated() {
        let data = two_cause_data();
        let before = data.clone();
        fit_predictors(&data, &[0, 1, 3], 2, 1.0).unwrap();
        assert_eq!(data, before);
    }
}
