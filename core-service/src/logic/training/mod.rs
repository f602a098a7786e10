//! Training Module - offline model artifact producer
//!
//! Reads a labeled fire dataset, derives binary labels from burned area,
//! fits the forest and evaluates it on a stratified hold-out split.

pub mod error;
pub mod dataset;
pub mod labels;
pub mod split;
pub mod metrics;
pub mod trainer;


pub use error::{DatasetError, TrainingError};
pub use dataset::{Dataset, FireRecord};
pub use labels::{fire_labels, median, FireLabels};
pub use metrics::{ClassificationReport, ConfusionMatrix, EvaluationReport};
pub use split::{stratified_split, SplitIndices};
pub use trainer::{train, TrainingConfig};
