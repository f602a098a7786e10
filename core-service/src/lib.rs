//! Forest Fire Risk - Core Library
//!
//! - `logic::features` - 12-feature input layout and vectors
//! - `logic::model` - random forest, artifact, estimator seam, risk tiers
//! - `logic::scoring` - scoring pipeline and prediction history
//! - `logic::training` - dataset, labeling, split, evaluation

pub mod constants;
pub mod logic;
