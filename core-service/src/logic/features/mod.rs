//! Features Module - Model Input Contract
//!
//! Owns the fixed 12-column layout the forest was fit on, the calendar
//! encoding shared by trainer and scorer, and the versioned vector type.

pub mod layout;
pub mod calendar;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_LABELS, LayoutInfo};
pub use vector::{FeatureError, FeatureVector, FeatureVectorBuilder, FireWeatherInput};
