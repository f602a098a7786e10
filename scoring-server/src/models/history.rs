//! History models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use fire_risk_core::logic::model::RiskTier;
use fire_risk_core::logic::scoring::{LocationPoint, PredictionRecord};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct HistoryQuery {
    /// Only the most recent N records
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Records stored in total
    pub total: usize,
    pub records: Vec<PredictionRecord>,
    pub tier_counts: BTreeMap<RiskTier, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub points: Vec<LocationPoint>,
}
