//! Estimator - the single seam between scoring and the frozen model
//!
//! Scoring only ever asks for the positive-class probability, so any
//! classifier runtime (native forest, ONNX session, test fake) plugs in
//! behind this trait.

use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureVector;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("inference failed: {0}")]
pub struct InferenceError(pub String);

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Describes a loaded estimator for status endpoints and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorInfo {
    /// "random_forest", "onnx", ...
    pub kind: String,
    /// Where the model came from (path or "<memory>")
    pub source: String,
    pub n_features: usize,
    pub n_estimators: Option<usize>,
    pub trained_at: Option<chrono::DateTime<chrono::Utc>>,
    pub checksum: Option<String>,
}

// ============================================================================
// ESTIMATOR TRAIT
// ============================================================================

/// Probability estimator for the "fire" class
pub trait Estimator: Send + Sync {
    /// Probability of the positive class for one feature vector
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, InferenceError>;

    /// Learned importance per feature, in layout order
    fn feature_importances(&self) -> Option<Vec<f64>> {
        None
    }

    fn describe(&self) -> EstimatorInfo;
}
