//! Trainer - dataset in, artifact and evaluation out
//!
//! Flow:
//! 1. Label every record against the dataset-wide median area
//! 2. Stratified split (seeded)
//! 3. Fit the smartcore forest on the train side
//! 4. Evaluate on the held-out side
//! 5. Wrap the classifier into a checksummed artifact

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_RANDOM_STATE, DEFAULT_TEST_SIZE};
use crate::logic::features::FEATURE_COUNT;
use crate::logic::model::{FireClassifier, ForestConfig, ModelArtifact};
use super::dataset::Dataset;
use super::error::TrainingError;
use super::labels::fire_labels;
use super::metrics::EvaluationReport;
use super::split::stratified_split;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub forest: ForestConfig,
    /// Share of records held out for evaluation
    pub test_size: f64,
    pub split_seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            forest: ForestConfig::default(),
            test_size: DEFAULT_TEST_SIZE,
            split_seed: DEFAULT_RANDOM_STATE,
        }
    }
}

/// Train a forest and report how it does on the held-out split
pub fn train(dataset: &Dataset, config: &TrainingConfig) -> Result<(ModelArtifact, EvaluationReport), TrainingError> {
    if dataset.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }

    let features = dataset.features();
    let labels = fire_labels(&dataset.areas()).ok_or(TrainingError::EmptyDataset)?;
    log::info!(
        "Labeled {} records: {} fire / {} no fire (median area {})",
        labels.labels.len(),
        labels.positives(),
        labels.labels.len() - labels.positives(),
        labels.median_area
    );

    let split = stratified_split(&labels.labels, config.test_size, config.split_seed)?;

    let pick = |indices: &[usize]| -> (Vec<[f64; FEATURE_COUNT]>, Vec<usize>) {
        indices.iter().map(|&i| (features[i], labels.labels[i])).unzip()
    };
    let (x_train, y_train) = pick(&split.train);
    let (x_test, y_test) = pick(&split.test);

    log::info!(
        "Fitting {} trees on {} records ({} held out)",
        config.forest.n_estimators,
        x_train.len(),
        x_test.len()
    );
    let classifier = FireClassifier::fit(&x_train, &y_train, &config.forest)?;

    let predicted = classifier.predict_batch(&x_test)?;
    let report = EvaluationReport::new(
        &y_test,
        &predicted,
        &labels.labels,
        labels.median_area,
        x_train.len(),
    );
    log::info!("Held-out accuracy {:.4}, F1 {:.4}", report.accuracy, report.f1);

    let artifact = ModelArtifact::new(classifier, config.forest.clone())?;
    Ok((artifact, report))
}
