//! Risk Scoring Pipeline
//!
//! `RiskScorer` is built once at startup around a loaded estimator and then
//! shared read-only (`Arc<RiskScorer>`). Scoring has no side effects;
//! recording into a history is the caller's business.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureVector, FEATURE_COUNT, FEATURE_LABELS, FEATURE_LAYOUT};
use crate::logic::model::{
    Estimator, EstimatorInfo, InferenceError, ModelArtifact, RiskTier, TierThresholds,
};
use super::error::{ScoringError, ScoringResult};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// What to do with values outside the input controls' domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Score whatever the caller sends
    #[default]
    PassThrough,
    /// Reject values outside `FEATURE_RANGES`
    Strict,
}

/// Probability plus its tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub tier: RiskTier,
}

impl RiskAssessment {
    /// Probability as a percentage with two decimals, e.g. "42.00%"
    pub fn percentage(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

/// One bar of the importance chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub name: String,
    pub label: String,
    pub importance: f64,
}

// ============================================================================
// SCORER
// ============================================================================

pub struct RiskScorer {
    estimator: Arc<dyn Estimator>,
    thresholds: TierThresholds,
    policy: InputPolicy,
}

impl RiskScorer {
    pub fn new(estimator: Arc<dyn Estimator>) -> Self {
        Self {
            estimator,
            thresholds: TierThresholds::default(),
            policy: InputPolicy::default(),
        }
    }

    /// Load a native forest artifact; failure is `ModelUnavailable`
    pub fn from_artifact(path: impl AsRef<Path>) -> ScoringResult<Self> {
        let artifact = ModelArtifact::load(path.as_ref()).map_err(|e| {
            log::error!("Model artifact unusable: {}", e);
            ScoringError::from(e)
        })?;
        Ok(Self::new(Arc::new(artifact)))
    }

    /// Load an ONNX export; failure is `ModelUnavailable`
    #[cfg(feature = "onnx")]
    pub fn from_onnx(path: &str, importances: Option<Vec<f64>>) -> ScoringResult<Self> {
        let mut estimator = crate::logic::model::OnnxEstimator::load(path)
            .map_err(|e| ScoringError::ModelUnavailable(e.to_string()))?;
        if let Some(importances) = importances {
            estimator = estimator.with_importances(importances);
        }
        Ok(Self::new(Arc::new(estimator)))
    }

    pub fn with_policy(mut self, policy: InputPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_thresholds(mut self, thresholds: TierThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    pub fn thresholds(&self) -> TierThresholds {
        self.thresholds
    }

    /// Score one feature vector
    pub fn score(&self, features: &FeatureVector) -> ScoringResult<RiskAssessment> {
        features.validate()?;
        if self.policy == InputPolicy::Strict {
            features.validate_ranges()?;
        }

        let probability = self.estimator.predict_probability(features)?;
        if !(0.0..=1.0).contains(&probability) {
            // NaN lands here too
            return Err(InferenceError(format!(
                "estimator returned probability {} outside [0, 1]",
                probability
            ))
            .into());
        }

        let tier = self.thresholds.tier_of(probability);
        log::debug!("Scored p={:.4} tier={}", probability, tier);

        Ok(RiskAssessment { probability, tier })
    }

    /// Score raw values in layout order; arity is enforced
    pub fn score_values(&self, values: &[f64]) -> ScoringResult<RiskAssessment> {
        let features = FeatureVector::from_slice(values)?;
        self.score(&features)
    }

    /// Importance per feature in layout order, if the estimator has them
    pub fn feature_importance(&self) -> Option<Vec<FeatureImportance>> {
        let importances = self.estimator.feature_importances()?;
        if importances.len() != FEATURE_COUNT {
            log::warn!(
                "Estimator reported {} importances for {} features, ignoring them",
                importances.len(),
                FEATURE_COUNT
            );
            return None;
        }
        Some(
            FEATURE_LAYOUT
                .iter()
                .zip(FEATURE_LABELS.iter())
                .zip(importances)
                .map(|((name, label), importance)| FeatureImportance {
                    name: name.to_string(),
                    label: label.to_string(),
                    importance,
                })
                .collect(),
        )
    }

    pub fn describe(&self) -> EstimatorInfo {
        self.estimator.describe()
    }
}

// ============================================================================
// TESTS
// ============================================================================
