//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! The forest was fit on these columns in exactly this order. Any change to
//! the order, the names, or the count must bump `FEATURE_VERSION`, which
//! invalidates every artifact trained against the previous layout.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector.
/// Names match the training dataset's column headers.
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Spatial (0-1) ===
    "X",        // 0: x-axis grid coordinate
    "Y",        // 1: y-axis grid coordinate

    // === Calendar (2-3) ===
    "month",    // 2: label-encoded month
    "day",      // 3: label-encoded day of week

    // === Fire weather indices (4-7) ===
    "FFMC",     // 4: Fine Fuel Moisture Code
    "DMC",      // 5: Duff Moisture Code
    "DC",       // 6: Drought Code
    "ISI",      // 7: Initial Spread Index

    // === Weather (8-11) ===
    "temp",     // 8: temperature in Celsius
    "RH",       // 9: relative humidity in %
    "wind",     // 10: wind speed in km/h
    "rain",     // 11: outside rain in mm/m2
];

/// Human-facing labels, same order as `FEATURE_LAYOUT`
pub const FEATURE_LABELS: &[&str] = &[
    "X", "Y", "Month", "Day", "FFMC", "DMC", "DC", "ISI", "Temp", "RH", "Wind", "Rain",
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 12;

// ============================================================================
// FEATURE DOMAINS
// ============================================================================

/// Inclusive value domain of a single feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    pub min: f64,
    pub max: f64,
}

impl FeatureRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Domains of the input controls, same order as `FEATURE_LAYOUT`
pub const FEATURE_RANGES: [FeatureRange; FEATURE_COUNT] = [
    FeatureRange::new(0.0, 10.0),   // X
    FeatureRange::new(0.0, 10.0),   // Y
    FeatureRange::new(0.0, 11.0),   // month
    FeatureRange::new(0.0, 6.0),    // day
    FeatureRange::new(0.0, 100.0),  // FFMC
    FeatureRange::new(0.0, 300.0),  // DMC
    FeatureRange::new(0.0, 800.0),  // DC
    FeatureRange::new(0.0, 60.0),   // ISI
    FeatureRange::new(-5.0, 40.0),  // temp
    FeatureRange::new(0.0, 100.0),  // RH
    FeatureRange::new(0.0, 10.0),   // wind
    FeatureRange::new(0.0, 10.0),   // rain
];

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches at runtime
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information, embedded in model artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Check this layout against the one compiled into the binary
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.hash)
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
     got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

/// Get display label by index
pub fn feature_label(index: usize) -> Option<&'static str> {
    FEATURE_LABELS.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 12);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
        assert_eq!(FEATURE_LABELS.len(), FEATURE_COUNT);
        assert_eq!(FEATURE_RANGES.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_consistency() {
        let hash1 = compute_layout_hash();
        let hash2 = compute_layout_hash();
        assert_eq!(hash1, hash2);
        assert_ne!(hash1, 0);
    }

    #[test]
    fn test_validate_layout_success() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
        assert!(LayoutInfo::current().validate().is_ok());
    }

    #[test]
    fn test_validate_layout_version_mismatch() {
        let err = validate_layout(FEATURE_VERSION + 1, layout_hash()).unwrap_err();
        assert_eq!(err.actual_version, FEATURE_VERSION + 1);
        assert_eq!(err.expected_version, FEATURE_VERSION);
    }

    #[test]
    fn test_validate_layout_hash_mismatch() {
        let result = validate_layout(FEATURE_VERSION, layout_hash().wrapping_add(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("X"), Some(0));
        assert_eq!(feature_index("month"), Some(2));
        assert_eq!(feature_index("temp"), Some(8));
        assert_eq!(feature_index("rain"), Some(11));
        assert_eq!(feature_index("area"), None);
    }

    #[test]
    fn test_feature_name_and_label() {
        assert_eq!(feature_name(0), Some("X"));
        assert_eq!(feature_name(9), Some("RH"));
        assert_eq!(feature_name(12), None);
        assert_eq!(feature_label(8), Some("Temp"));
    }

    #[test]
    fn test_ranges() {
        let temp = FEATURE_RANGES[feature_index("temp").unwrap()];
        assert!(temp.contains(-5.0));
        assert!(temp.contains(40.0));
        assert!(!temp.contains(40.5));
        assert!(!FEATURE_RANGES[feature_index("day").unwrap()].contains(7.0));
    }
}
