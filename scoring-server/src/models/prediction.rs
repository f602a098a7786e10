//! Prediction models

use serde::{Deserialize, Serialize};

use fire_risk_core::logic::model::RiskTier;
use fire_risk_core::logic::scoring::RiskAssessment;

/// Raw values in layout order
#[derive(Debug, Clone, Deserialize)]
pub struct VectorRequest {
    pub values: Vec<f64>,
}

/// Assessment as shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub probability: f64,
    /// e.g. "42.00%"
    pub percentage: String,
    pub tier: RiskTier,
    /// e.g. "MEDIUM RISK"
    pub label: String,
    /// Hex display color of the tier
    pub color: String,
}

impl From<RiskAssessment> for PredictionResponse {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            probability: assessment.probability,
            percentage: assessment.percentage(),
            tier: assessment.tier,
            label: assessment.tier.label().to_string(),
            color: assessment.tier.color().to_string(),
        }
    }
}
