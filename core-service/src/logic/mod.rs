//! Logic Module - Business Logic
//!
//! ## Architecture
//! - `features/` - Feature layout, calendar encoding, vectors
//! - `model/` - Forest, artifact, estimator trait, tiers
//! - `scoring/` - Vector -> probability -> tier, history
//! - `training/` - Offline trainer

pub mod features;
pub mod model;
pub mod scoring;
pub mod training;
