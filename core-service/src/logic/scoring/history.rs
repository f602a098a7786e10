//! Prediction History - caller-owned, append-only
//!
//! Records keep the column names of the history table
//! (`X`, `Y`, `Probability`, `Risk`). The history is passed into
//! [`PredictionHistory::record`] by value and handed back with the new
//! entry at the end; there is no way to remove or reorder entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureVector;
use crate::logic::model::RiskTier;
use super::pipeline::RiskAssessment;

/// One scored request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Probability")]
    pub probability: f64,
    #[serde(rename = "Risk")]
    pub tier: RiskTier,
}

impl PredictionRecord {
    pub fn new(features: &FeatureVector, assessment: &RiskAssessment) -> Self {
        Self {
            x: features.get_by_name("X").unwrap_or_default(),
            y: features.get_by_name("Y").unwrap_or_default(),
            probability: assessment.probability,
            tier: assessment.tier,
        }
    }
}

/// A point of the risk-location scatter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub x: f64,
    pub y: f64,
    pub tier: RiskTier,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionHistory {
    records: Vec<PredictionRecord>,
}

impl PredictionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning the extended history
    pub fn push(mut self, record: PredictionRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Append the outcome of one scoring call
    pub fn record(self, features: &FeatureVector, assessment: &RiskAssessment) -> Self {
        self.push(PredictionRecord::new(features, assessment))
    }

    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    /// The most recent `n` records, oldest first
    pub fn last(&self, n: usize) -> &[PredictionRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PredictionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (X, Y, tier) for the location scatter
    pub fn locations(&self) -> Vec<LocationPoint> {
        self.records
            .iter()
            .map(|r| LocationPoint { x: r.x, y: r.y, tier: r.tier })
            .collect()
    }

    /// Count per tier; every tier is present, possibly with zero
    pub fn tier_counts(&self) -> BTreeMap<RiskTier, usize> {
        let mut counts: BTreeMap<RiskTier, usize> =
            RiskTier::all().into_iter().map(|t| (t, 0)).collect();
        for record in &self.records {
            *counts.entry(record.tier).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a PredictionHistory {
    type Item = &'a PredictionRecord;
    type IntoIter = std::slice::Iter<'a, PredictionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
