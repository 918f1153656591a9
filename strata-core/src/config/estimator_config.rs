//! Adjacency estimator configuration.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Information criterion used to pick the Lasso regularization strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InformationCriterion {
    /// Bayesian information criterion, penalty `ln(n_samples)` per coefficient.
    #[default]
    Bic,
    /// Akaike information criterion, penalty `2` per coefficient.
    Aic,
}

impl InformationCriterion {
    /// Per-coefficient penalty for a sample of `n_samples` rows.
    pub fn penalty(self, n_samples: usize) -> f64 {
        match self {
            Self::Bic => (n_samples as f64).ln(),
            Self::Aic => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bic => "bic",
            Self::Aic => "aic",
        }
    }
}

impl std::str::FromStr for InformationCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bic" => Ok(Self::Bic),
            "aic" => Ok(Self::Aic),
            other => Err(format!("unknown information criterion '{other}'")),
        }
    }
}

/// Configuration for the adjacency estimator.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Exponent applied to the initial OLS magnitudes. Default: 1.0.
    pub gamma: Option<f64>,
    /// Criterion for selecting the Lasso path point. Default: bic.
    pub criterion: Option<InformationCriterion>,
    /// Maximum LARS steps per fit. Default: 500.
    pub max_iter: Option<usize>,
    /// Fit targets on the rayon pool. Default: false.
    pub parallel: Option<bool>,
    /// Keep effect signs instead of magnitudes. Default: false.
    pub signed: Option<bool>,
}

impl EstimatorConfig {
    /// Returns the effective gamma, defaulting to 1.0.
    pub fn effective_gamma(&self) -> f64 {
        self.gamma.unwrap_or(defaults::DEFAULT_GAMMA)
    }

    /// Returns the effective information criterion, defaulting to BIC.
    pub fn effective_criterion(&self) -> InformationCriterion {
        self.criterion.unwrap_or_default()
    }

    /// Returns the effective LARS step limit, defaulting to 500.
    pub fn effective_max_iter(&self) -> usize {
        self.max_iter.unwrap_or(defaults::DEFAULT_MAX_ITER)
    }

    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(defaults::DEFAULT_PARALLEL)
    }

    pub fn effective_signed(&self) -> bool {
        self.signed.unwrap_or(defaults::DEFAULT_SIGNED)
    }

    /// Reject a gamma that is not finite and positive, or a zero step limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(gamma) = self.gamma {
            if !gamma.is_finite() || gamma <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "estimator.gamma".to_string(),
                    message: "must be a finite number greater than 0".to_string(),
                });
            }
        }
        if self.max_iter == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "estimator.max_iter".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behaviour() {
        let config = EstimatorConfig::default();
        assert_eq!(config.effective_gamma(), 1.0);
        assert_eq!(config.effective_criterion(), InformationCriterion::Bic);
        assert_eq!(config.effective_max_iter(), 500);
        assert!(!config.effective_parallel());
        assert!(!config.effective_signed());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_gamma_and_zero_steps() {
        for gamma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = EstimatorConfig {
                gamma: Some(gamma),
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::ValidationFailed { ref field, .. }) if field == "estimator.gamma"),
                "gamma {gamma} accepted"
            );
        }
        let config = EstimatorConfig {
            max_iter: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn criterion_penalties() {
        assert!((InformationCriterion::Bic.penalty(100) - 100f64.ln()).abs() < 1e-12);
        assert_eq!(InformationCriterion::Aic.penalty(100), 2.0);
        assert_eq!("AIC".parse::<InformationCriterion>(), Ok(InformationCriterion::Aic));
        assert!("cv".parse::<InformationCriterion>().is_err());
    }
}
