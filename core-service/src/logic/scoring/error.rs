//! Scoring errors

use crate::logic::features::FeatureError;
use crate::logic::model::{ArtifactError, InferenceError};

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// The model could not be loaded; nothing can be scored
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("invalid feature vector: {0}")]
    InvalidFeatureVector(#[from] FeatureError),

    #[error("model inference failed: {0}")]
    ModelInference(#[from] InferenceError),
}

impl From<ArtifactError> for ScoringError {
    fn from(err: ArtifactError) -> Self {
        ScoringError::ModelUnavailable(err.to_string())
    }
}

pub type ScoringResult<T> = Result<T, ScoringError>;
