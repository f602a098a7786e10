//! Scoring Module - feature vector in, risk assessment out

pub mod error;
pub mod pipeline;
pub mod history;

pub use error::{ScoringError, ScoringResult};
pub use pipeline::{FeatureImportance, InputPolicy, RiskAssessment, RiskScorer};
pub use history::{LocationPoint, PredictionHistory, PredictionRecord};
