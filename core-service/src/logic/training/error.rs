//! Training errors

use crate::logic::model::{ArtifactError, ClassifierError};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("cannot read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset has no header row")]
    MissingHeader,

    #[error("dataset is missing column '{0}'")]
    MissingColumn(String),

    #[error("line {line}: expected {expected} fields, got {actual}")]
    ShortRow { line: usize, expected: usize, actual: usize },

    #[error("line {line}: invalid value '{value}' in column '{column}'")]
    InvalidValue { line: usize, column: String, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("dataset has no records")]
    EmptyDataset,

    #[error("cannot split dataset: {0}")]
    InvalidSplit(String),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
