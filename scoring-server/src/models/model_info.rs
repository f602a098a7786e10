//! Model description models

use serde::{Deserialize, Serialize};

use fire_risk_core::logic::features::layout::{FeatureRange, FEATURE_RANGES};
use fire_risk_core::logic::features::{LayoutInfo, FEATURE_LABELS, FEATURE_LAYOUT};
use fire_risk_core::logic::model::{EstimatorInfo, TierThresholds};
use fire_risk_core::logic::scoring::InputPolicy;

/// One input slot of the layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    pub index: usize,
    pub name: String,
    pub label: String,
    pub range: FeatureRange,
}

impl FeatureDescriptor {
    pub fn all() -> Vec<Self> {
        FEATURE_LAYOUT
            .iter()
            .zip(FEATURE_LABELS.iter())
            .zip(FEATURE_RANGES.iter())
            .enumerate()
            .map(|(index, ((name, label), range))| Self {
                index,
                name: name.to_string(),
                label: label.to_string(),
                range: *range,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    pub estimator: EstimatorInfo,
    pub layout: LayoutInfo,
    pub features: Vec<FeatureDescriptor>,
    pub thresholds: TierThresholds,
    pub input_policy: InputPolicy,
}
