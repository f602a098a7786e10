//! Model Artifact - versioned, checksummed forest file
//!
//! The file is a JSON envelope around the fitted smartcore forest.
//! Loading checks, in order: format tag, format version, feature layout,
//! classifier sanity and finally the SHA-256 checksum of the classifier
//! body. Any failure means the artifact is unusable and scoring must not
//! start.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::features::{FeatureVector, LayoutInfo, FEATURE_COUNT};
use crate::logic::features::layout::LayoutMismatchError;
use super::estimator::{Estimator, EstimatorInfo, InferenceError};
use super::classifier::{ClassifierError, FireClassifier, ForestConfig};

// ============================================================================
// CONSTANTS
// ============================================================================

pub const ARTIFACT_FORMAT: &str = "fire-risk-forest";
pub const ARTIFACT_VERSION: u32 = 1;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("cannot access model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("model file is not valid: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported artifact format '{0}'")]
    UnsupportedFormat(String),

    #[error("unsupported artifact version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error(transparent)]
    Malformed(#[from] ClassifierError),

    #[error("checksum mismatch: recorded {recorded}, computed {computed}")]
    ChecksumMismatch { recorded: String, computed: String },
}

// ============================================================================
// ARTIFACT
// ============================================================================

/// Frozen output of training
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format: String,
    pub format_version: u32,
    /// Feature layout the classifier was fit on
    pub layout: LayoutInfo,
    pub trained_at: DateTime<Utc>,
    pub config: ForestConfig,
    /// SHA-256 (hex) of the serialized classifier
    pub checksum: String,
    pub classifier: FireClassifier,

    #[serde(skip)]
    source: Option<String>,
}

/// SHA-256 over the classifier's canonical JSON form
pub fn compute_checksum(classifier: &FireClassifier) -> Result<String, ArtifactError> {
    let body = serde_json::to_vec(classifier)?;
    let mut hasher = Sha256::new();
    hasher.update(&body);
    Ok(hex::encode(hasher.finalize()))
}

impl ModelArtifact {
    /// Wrap a freshly fitted classifier
    pub fn new(classifier: FireClassifier, config: ForestConfig) -> Result<Self, ArtifactError> {
        let checksum = compute_checksum(&classifier)?;
        Ok(Self {
            format: ARTIFACT_FORMAT.to_string(),
            format_version: ARTIFACT_VERSION,
            layout: LayoutInfo::current(),
            trained_at: Utc::now(),
            config,
            checksum,
            classifier,
            source: None,
        })
    }

    /// Run every load-time check
    pub fn verify(&self) -> Result<(), ArtifactError> {
        if self.format != ARTIFACT_FORMAT {
            return Err(ArtifactError::UnsupportedFormat(self.format.clone()));
        }
        if self.format_version != ARTIFACT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: self.format_version,
                expected: ARTIFACT_VERSION,
            });
        }

        self.layout.validate()?;

        if self.classifier.n_features() != FEATURE_COUNT {
            return Err(ClassifierError::Malformed(format!(
                "classifier expects {} features, layout has {}",
                self.classifier.n_features(),
                FEATURE_COUNT
            ))
            .into());
        }
        self.classifier.validate()?;

        let computed = compute_checksum(&self.classifier)?;
        if computed != self.checksum {
            return Err(ArtifactError::ChecksumMismatch {
                recorded: self.checksum.clone(),
                computed,
            });
        }

        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse and verify
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        artifact.verify()?;
        Ok(artifact)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ArtifactError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        fs::write(path, bytes).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;

        log::info!("Model artifact saved to {} ({} trees)", path.display(), self.classifier.n_trees());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        log::info!("Loading model artifact from: {}", path.display());

        let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut artifact = Self::from_bytes(&bytes)?;
        artifact.source = Some(path.display().to_string());

        log::info!(
            "Model artifact loaded: {} trees, trained {}",
            artifact.classifier.n_trees(),
            artifact.trained_at.to_rfc3339()
        );
        Ok(artifact)
    }

    /// Per-feature importance, layout order
    pub fn importances(&self) -> &[f64] {
        self.classifier.feature_importances()
    }
}

impl Estimator for ModelArtifact {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        self.classifier
            .predict_proba(features.as_slice())
            .map_err(|e| InferenceError(e.to_string()))
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        Some(self.importances().to_vec())
    }

    fn describe(&self) -> EstimatorInfo {
        EstimatorInfo {
            kind: "random_forest".to_string(),
            source: self.source.clone().unwrap_or_else(|| "<memory>".to_string()),
            n_features: self.classifier.n_features(),
            n_estimators: Some(self.classifier.n_trees()),
            trained_at: Some(self.trained_at),
            checksum: Some(self.checksum.clone()),
        }
    }
}
