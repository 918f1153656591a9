//! AdjacencyEstimator: regresses every node on its predecessors in a causal order.

use nalgebra::DMatrix;
use rayon::prelude::*;
use strata_core::config::{EstimatorConfig, StrataConfig};
use strata_core::errors::{ShapeError, StrataError, StrataResult};
use strata_core::types::validate_nodes;
use strata_core::PriorKnowledge;
use tracing::{debug, info};

use crate::adaptive_lasso::{fit_predictors_with, PredictorFit};
use crate::standardize::check_finite;

/// One regression to run: a target and its allowed predecessors.
struct TargetTask {
    target: usize,
    predictors: Vec<usize>,
}

/// Estimates an `n x n` adjacency matrix of effect strengths, laid out as
/// `[target, predictor]`.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyEstimator {
    config: EstimatorConfig,
}

impl AdjacencyEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: &StrataConfig) -> Self {
        Self::new(config.estimator.clone())
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate effect strengths along `order`.
    ///
    /// The first node in `order` is exogenous. Each later node is regressed on
    /// all earlier nodes that `prior` allows; a node with no allowed
    /// predecessors keeps an all-zero row. Entries are magnitudes unless the
    /// config asks for signed effects.
    pub fn estimate(
        &self,
        order: &[usize],
        data: &DMatrix<f64>,
        prior: Option<&PriorKnowledge>,
    ) -> StrataResult<DMatrix<f64>> {
        self.config.validate()?;
        let n = data.ncols();
        if n == 0 {
            return Err(ShapeError::EmptyData { what: "columns" }.into());
        }
        if data.nrows() == 0 {
            return Err(ShapeError::EmptyData { what: "rows" }.into());
        }
        validate_nodes(order, n)?;
        if let Some(pk) = prior {
            pk.check_dim(n)?;
        }
        check_finite(data)?;

        let tasks = plan_targets(order, prior);
        info!(
            samples = data.nrows(),
            variables = n,
            targets = tasks.len(),
            parallel = self.config.effective_parallel(),
            "estimating adjacency matrix"
        );

        let fits: Vec<(TargetTask, PredictorFit)> = if self.config.effective_parallel() {
            tasks
                .into_par_iter()
                .map(|task| self.fit_task(data, task))
                .collect::<StrataResult<_>>()?
        } else {
            tasks
                .into_iter()
                .map(|task| self.fit_task(data, task))
                .collect::<StrataResult<_>>()?
        };

        let mut adjacency = DMatrix::zeros(n, n);
        for (task, fit) in &fits {
            for (&predictor, &coef) in task.predictors.iter().zip(&fit.coefficients) {
                adjacency[(task.target, predictor)] = coef;
            }
        }
        if !self.config.effective_signed() {
            adjacency.apply(|v| *v = v.abs());
        }

        info!(
            edges = adjacency.iter().filter(|&&v| v != 0.0).count(),
            "adjacency matrix estimated"
        );
        Ok(adjacency)
    }

    fn fit_task(
        &self,
        data: &DMatrix<f64>,
        task: TargetTask,
    ) -> StrataResult<(TargetTask, PredictorFit)> {
        let fit = fit_predictors_with(data, &task.predictors, task.target, &self.config)
            .map_err(|e| match e {
                StrataError::Estimation(inner) => inner.for_target(task.target).into(),
                other => other,
            })?;
        debug!(
            target = task.target,
            candidates = task.predictors.len(),
            selected = fit.selected_count(),
            alpha = fit.alpha,
            "fitted target"
        );
        Ok((task, fit))
    }
}

/// Targets with at least one allowed predecessor, in order.
fn plan_targets(order: &[usize], prior: Option<&PriorKnowledge>) -> Vec<TargetTask> {
    let mut tasks = Vec::with_capacity(order.len().saturating_sub(1));
    for (i, &target) in order.iter().enumerate().skip(1) {
        let predictors: Vec<usize> = order[..i]
            .iter()
            .copied()
            .filter(|&p| prior.map_or(true, |pk| pk.allows(target, p)))
            .collect();
        if predictors.is_empty() {
            debug!(target, "no allowed predecessors, treating as exogenous");
            continue;
        }
        tasks.push(TargetTask { target, predictors });
    }
    tasks
}

/// Estimate with the default configuration.
pub fn estimate_adjacency_matrix(
    order: &[usize],
    data: &DMatrix<f64>,
    prior: Option<&PriorKnowledge>,
) -> StrataResult<DMatrix<f64>> {
    AdjacencyEstimator::default().estimate(order, data, prior)
}
