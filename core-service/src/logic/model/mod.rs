//! Model Module - frozen classifier and risk tiers
//!
//! Scoring talks to the model only through `Estimator`, so the
//! smartcore forest, an ONNX session, or a test fake are interchangeable.

pub mod estimator;
pub mod classifier;
pub mod artifact;
pub mod tier;
#[cfg(feature = "onnx")]
pub mod onnx;

// Re-export common types
pub use estimator::{Estimator, EstimatorInfo, InferenceError};
pub use classifier::{ClassifierError, FireClassifier, ForestConfig};
pub use artifact::{ArtifactError, ModelArtifact};
pub use tier::{tier_of, RiskTier, TierThresholds};
#[cfg(feature = "onnx")]
pub use onnx::OnnxEstimator;
