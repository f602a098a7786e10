//! Risk Tier Thresholds
//!
//! Maps a fire probability onto Low / Medium / High.
//! Comparisons are strict-less-than, so a probability sitting exactly on
//! a threshold belongs to the upper tier.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};

/// Discrete risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Banner text shown next to the percentage
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW RISK",
            RiskTier::Medium => "MEDIUM RISK",
            RiskTier::High => "HIGH RISK",
        }
    }

    /// Display color (green / yellow / red)
    pub fn color(&self) -> &'static str {
        match self {
            RiskTier::Low => "#2ecc71",
            RiskTier::Medium => "#f1c40f",
            RiskTier::High => "#e74c3c",
        }
    }

    pub fn all() -> [RiskTier; 3] {
        [RiskTier::Low, RiskTier::Medium, RiskTier::High]
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        };
        f.write_str(name)
    }
}

/// Threshold Configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Lower bound of Medium (inclusive)
    pub medium: f64,

    /// Lower bound of High (inclusive)
    pub high: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            medium: MEDIUM_RISK_THRESHOLD,
            high: HIGH_RISK_THRESHOLD,
        }
    }
}

impl TierThresholds {
    /// Classify a probability
    pub fn tier_of(&self, probability: f64) -> RiskTier {
        if probability < self.medium {
            RiskTier::Low
        } else if probability < self.high {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }
}

/// Classify with the default thresholds (0.4, 0.7)
pub fn tier_of(probability: f64) -> RiskTier {
    TierThresholds::default().tier_of(probability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = TierThresholds::default();
        assert_eq!(t.medium, 0.4);
        assert_eq!(t.high, 0.7);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(tier_of(0.0), RiskTier::Low);
        assert_eq!(tier_of(0.39999), RiskTier::Low);
        assert_eq!(tier_of(0.4), RiskTier::Medium);
        assert_eq!(tier_of(0.69999), RiskTier::Medium);
        assert_eq!(tier_of(0.7), RiskTier::High);
        assert_eq!(tier_of(1.0), RiskTier::High);
    }

    #[test]
    fn test_monotonic() {
        let mut previous = RiskTier::Low;
        for step in 0..=10_000 {
            let p = step as f64 / 10_000.0;
            let tier = tier_of(p);
            assert!(tier >= previous, "tier dropped at p={}", p);
            previous = tier;
        }
        assert_eq!(previous, RiskTier::High);
    }

    #[test]
    fn test_display_metadata() {
        assert_eq!(RiskTier::Medium.to_string(), "Medium");
        assert_eq!(RiskTier::High.label(), "HIGH RISK");
        assert_eq!(RiskTier::Low.color(), "#2ecc71");
        assert_eq!(serde_json::to_string(&RiskTier::Low).unwrap(), "\"Low\"");
    }
}
