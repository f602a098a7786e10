//! Feature Vector - Core data structure for model input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks

use serde::{Deserialize, Serialize};
use super::layout::{
    FEATURE_COUNT, FEATURE_VERSION, FEATURE_LAYOUT, FEATURE_RANGES,
    layout_hash, validate_layout, LayoutMismatchError,
};

// ============================================================================
// ERRORS
// ============================================================================

/// Why a feature vector cannot be scored
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    #[error("expected {expected} features, got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error("feature '{feature}' is not a finite number")]
    NonFinite { feature: &'static str },

    #[error("feature '{feature}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        feature: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
///
/// Values are always stored in `FEATURE_LAYOUT` order. Build one through
/// the named setters or [`FireWeatherInput`] rather than by hand so the
/// order cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self::from_values([0.0; FEATURE_COUNT])
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Create from a slice, rejecting anything but exactly `FEATURE_COUNT` values
    pub fn from_slice(values: &[f64]) -> Result<Self, FeatureError> {
        let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| FeatureError::Arity {
            expected: FEATURE_COUNT,
            actual: values.len(),
        })?;
        Ok(Self::from_values(array))
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by index
    pub fn set(&mut self, index: usize, value: f64) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Set feature by name
    pub fn set_by_name(&mut self, name: &str, value: f64) -> bool {
        if let Some(index) = super::layout::feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    /// Validate that this vector is compatible with current layout
    /// and holds only finite numbers
    pub fn validate(&self) -> Result<(), FeatureError> {
        validate_layout(self.version, self.layout_hash)?;

        for (name, value) in FEATURE_LAYOUT.iter().zip(self.values.iter()) {
            if !value.is_finite() {
                return Err(FeatureError::NonFinite { feature: name });
            }
        }

        Ok(())
    }

    /// Check every value against its input domain
    pub fn validate_ranges(&self) -> Result<(), FeatureError> {
        for ((name, range), &value) in FEATURE_LAYOUT
            .iter()
            .zip(FEATURE_RANGES.iter())
            .zip(self.values.iter())
        {
            if !range.contains(value) {
                return Err(FeatureError::OutOfRange {
                    feature: name,
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        Ok(())
    }

    /// Check if this vector is compatible with current layout
    pub fn is_compatible(&self) -> bool {
        validate_layout(self.version, self.layout_hash).is_ok()
    }

    /// Get feature names for this vector
    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

impl TryFrom<Vec<f64>> for FeatureVector {
    type Error = FeatureError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

// ============================================================================
// NAMED INPUT
// ============================================================================

/// Named form of the twelve inputs, keyed by dataset column names.
///
/// This is what callers send over the wire; conversion into a
/// [`FeatureVector`] puts every field in its layout slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireWeatherInput {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    pub month: f64,
    pub day: f64,
    #[serde(rename = "FFMC")]
    pub ffmc: f64,
    #[serde(rename = "DMC")]
    pub dmc: f64,
    #[serde(rename = "DC")]
    pub dc: f64,
    #[serde(rename = "ISI")]
    pub isi: f64,
    pub temp: f64,
    #[serde(rename = "RH")]
    pub rh: f64,
    pub wind: f64,
    pub rain: f64,
}

impl Default for FireWeatherInput {
    /// Mid-range defaults of the input controls
    fn default() -> Self {
        Self {
            x: 5.0,
            y: 5.0,
            month: 0.0,
            day: 0.0,
            ffmc: 50.0,
            dmc: 100.0,
            dc: 400.0,
            isi: 10.0,
            temp: 20.0,
            rh: 40.0,
            wind: 3.0,
            rain: 0.0,
        }
    }
}

impl From<FireWeatherInput> for FeatureVector {
    fn from(input: FireWeatherInput) -> Self {
        FeatureVectorBuilder::new()
            .x(input.x)
            .y(input.y)
            .month(input.month)
            .day(input.day)
            .ffmc(input.ffmc)
            .dmc(input.dmc)
            .dc(input.dc)
            .isi(input.isi)
            .temp(input.temp)
            .rh(input.rh)
            .wind(input.wind)
            .rain(input.rain)
            .build()
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self { vector: FeatureVector::new() }
    }

    // Spatial
    pub fn x(mut self, value: f64) -> Self {
        self.vector.set_by_name("X", value);
        self
    }

    pub fn y(mut self, value: f64) -> Self {
        self.vector.set_by_name("Y", value);
        self
    }

    // Calendar
    pub fn month(mut self, value: f64) -> Self {
        self.vector.set_by_name("month", value);
        self
    }

    pub fn day(mut self, value: f64) -> Self {
        self.vector.set_by_name("day", value);
        self
    }

    // Fire weather indices
    pub fn ffmc(mut self, value: f64) -> Self {
        self.vector.set_by_name("FFMC", value);
        self
    }

    pub fn dmc(mut self, value: f64) -> Self {
        self.vector.set_by_name("DMC", value);
        self
    }

    pub fn dc(mut self, value: f64) -> Self {
        self.vector.set_by_name("DC", value);
        self
    }

    pub fn isi(mut self, value: f64) -> Self {
        self.vector.set_by_name("ISI", value);
        self
    }

    // Weather
    pub fn temp(mut self, value: f64) -> Self {
        self.vector.set_by_name("temp", value);
        self
    }

    pub fn rh(mut self, value: f64) -> Self {
        self.vector.set_by_name("RH", value);
        self
    }

    pub fn wind(mut self, value: f64) -> Self {
        self.vector.set_by_name("wind", value);
        self
    }

    pub fn rain(mut self, value: f64) -> Self {
        self.vector.set_by_name("rain", value);
        self
    }

    /// Set feature by name dynamically
    pub fn set(mut self, name: &str, value: f64) -> Self {
        self.vector.set_by_name(name, value);
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
