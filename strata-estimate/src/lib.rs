//! # strata-estimate
//!
//! Estimates linear causal-effect strengths along a given causal order.
//! Each target is regressed on its predecessors with an adaptive Lasso:
//! standardize, weight by initial OLS magnitudes, pick a LARS-Lasso path
//! point by information criterion, then refit OLS on the survivors.

pub mod adaptive_lasso;
pub mod estimator;
pub mod lars;
pub mod ols;
pub mod standardize;

pub use adaptive_lasso::{fit_predictors, PredictorFit};
pub use estimator::{estimate_adjacency_matrix, AdjacencyEstimator};
pub use lars::{lasso_lars_ic, lasso_lars_path, LarsPath, LassoIcFit};
