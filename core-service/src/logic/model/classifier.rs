//! Fire Classifier - smartcore random forest
//!
//! Fitting and inference are done by smartcore's `RandomForestClassifier`.
//! This module adapts rows, labels and configuration to it, and measures a
//! per-feature importance once after fitting (mean absolute shift of the
//! fire probability when one column is shuffled across the training rows).
//!
//! The fitted forest is serde-serializable and travels inside the model
//! artifact unchanged.

use std::fmt::Display;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::constants::{DEFAULT_N_ESTIMATORS, DEFAULT_RANDOM_STATE};

/// Column of the "fire" class in the probability output
pub const POSITIVE_CLASS: usize = 1;

/// The concrete smartcore forest type stored in artifacts
pub type ForestModel = RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("cannot fit on an empty dataset")]
    EmptyDataset,

    #[error("{samples} samples but {labels} labels")]
    LengthMismatch { samples: usize, labels: usize },

    #[error("row {row} has {actual} features, expected {expected}")]
    InconsistentFeatures { row: usize, expected: usize, actual: usize },

    #[error("row {row} contains a non-finite value")]
    NonFinite { row: usize },

    #[error("training labels must contain both classes 0 and 1")]
    SingleClass,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("smartcore: {0}")]
    Library(String),

    #[error("malformed classifier: {0}")]
    Malformed(String),
}

fn library(err: impl Display) -> ClassifierError {
    ClassifierError::Library(err.to_string())
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Forest hyper-parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_estimators: usize,
    /// Features tried per split; `None` is `floor(sqrt(n_features))`
    pub max_features: Option<usize>,
    /// `None` grows trees until leaves are pure
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            max_features: None,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: DEFAULT_RANDOM_STATE,
        }
    }
}

impl ForestConfig {
    fn parameters(&self) -> Result<RandomForestClassifierParameters, ClassifierError> {
        let n_trees = u16::try_from(self.n_estimators)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                ClassifierError::InvalidConfig(format!(
                    "n_estimators must be in 1..={}, got {}",
                    u16::MAX,
                    self.n_estimators
                ))
            })?;
        if self.min_samples_split < 2 {
            return Err(ClassifierError::InvalidConfig("min_samples_split must be >= 2".into()));
        }
        if self.min_samples_leaf < 1 {
            return Err(ClassifierError::InvalidConfig("min_samples_leaf must be >= 1".into()));
        }

        let mut params = RandomForestClassifierParameters::default()
            .with_n_trees(n_trees)
            .with_min_samples_split(self.min_samples_split)
            .with_min_samples_leaf(self.min_samples_leaf)
            .with_seed(self.seed);
        if let Some(depth) = self.max_depth {
            params = params.with_max_depth(depth);
        }
        if let Some(m) = self.max_features {
            if m == 0 {
                return Err(ClassifierError::InvalidConfig("max_features must be >= 1".into()));
            }
            params = params.with_m(m);
        }
        Ok(params)
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

fn to_matrix<R: AsRef<[f64]>>(rows: &[R]) -> Result<DenseMatrix<f64>, ClassifierError> {
    let data: Vec<Vec<f64>> = rows.iter().map(|r| r.as_ref().to_vec()).collect();
    DenseMatrix::from_2d_vec(&data).map_err(library)
}

/// Fitted binary fire classifier plus its learned importances
#[derive(Debug, Serialize, Deserialize)]
pub struct FireClassifier {
    model: ForestModel,
    n_features: usize,
    n_trees: usize,
    feature_importances: Vec<f64>,
}

impl FireClassifier {
    /// Fit on rows `x` with labels `y` in `{0, 1}`
    pub fn fit<R: AsRef<[f64]>>(x: &[R], y: &[usize], config: &ForestConfig) -> Result<Self, ClassifierError> {
        let params = config.parameters()?;

        if x.is_empty() {
            return Err(ClassifierError::EmptyDataset);
        }
        if x.len() != y.len() {
            return Err(ClassifierError::LengthMismatch { samples: x.len(), labels: y.len() });
        }

        let n_features = x[0].as_ref().len();
        for (row, values) in x.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != n_features {
                return Err(ClassifierError::InconsistentFeatures {
                    row,
                    expected: n_features,
                    actual: values.len(),
                });
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(ClassifierError::NonFinite { row });
            }
        }
        if y.iter().any(|&label| label > POSITIVE_CLASS) || !y.contains(&0) || !y.contains(&POSITIVE_CLASS) {
            return Err(ClassifierError::SingleClass);
        }

        let labels: Vec<u32> = y.iter().map(|&label| label as u32).collect();
        let model = ForestModel::fit(&to_matrix(x)?, &labels, params).map_err(library)?;

        let mut classifier = Self {
            model,
            n_features,
            n_trees: config.n_estimators,
            feature_importances: vec![0.0; n_features],
        };
        classifier.feature_importances = classifier.shuffle_importances(x, config.seed)?;
        log::debug!("Fitted {} trees on {} rows", classifier.n_trees, x.len());

        Ok(classifier)
    }

    /// Fire probability for every row of `matrix`
    fn positive_probabilities(&self, matrix: &DenseMatrix<f64>) -> Result<Vec<f64>, ClassifierError> {
        let proba = self.model.predict_proba(matrix).map_err(library)?;
        let (rows, cols) = proba.shape();
        if cols <= POSITIVE_CLASS {
            return Err(ClassifierError::Malformed(format!(
                "probability output has {} column(s)",
                cols
            )));
        }
        Ok((0..rows).map(|r| *proba.get((r, POSITIVE_CLASS))).collect())
    }

    /// Shuffle one column at a time and measure how far the fire
    /// probability moves on average; normalized to sum to 1
    fn shuffle_importances<R: AsRef<[f64]>>(&self, x: &[R], seed: u64) -> Result<Vec<f64>, ClassifierError> {
        let baseline = self.positive_probabilities(&to_matrix(x)?)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..x.len()).collect();

        let mut scores = Vec::with_capacity(self.n_features);
        for feature in 0..self.n_features {
            order.shuffle(&mut rng);
            let shuffled: Vec<Vec<f64>> = x
                .iter()
                .zip(order.iter())
                .map(|(row, &source)| {
                    let mut row = row.as_ref().to_vec();
                    row[feature] = x[source].as_ref()[feature];
                    row
                })
                .collect();

            let moved = self.positive_probabilities(&to_matrix(&shuffled)?)?;
            let shift = baseline
                .iter()
                .zip(moved.iter())
                .map(|(a, b)| (a - b).abs())
                .sum::<f64>()
                / x.len() as f64;
            scores.push(shift);
        }

        let total: f64 = scores.iter().sum();
        if total > 0.0 {
            for s in scores.iter_mut() {
                *s /= total;
            }
        }
        Ok(scores)
    }

    /// Fire probability for one row
    pub fn predict_proba(&self, features: &[f64]) -> Result<f64, ClassifierError> {
        if features.len() != self.n_features {
            return Err(ClassifierError::InconsistentFeatures {
                row: 0,
                expected: self.n_features,
                actual: features.len(),
            });
        }
        self.positive_probabilities(&to_matrix(&[features])?)?
            .first()
            .copied()
            .ok_or_else(|| ClassifierError::Malformed("empty probability output".into()))
    }

    /// Majority-vote class for each row
    pub fn predict_batch<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<usize>, ClassifierError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let predicted: Vec<u32> = self.model.predict(&to_matrix(rows)?).map_err(library)?;
        Ok(predicted.into_iter().map(|c| c as usize).collect())
    }

    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Check a classifier that came from disk
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.n_trees == 0 {
            return Err(ClassifierError::Malformed("classifier has no trees".into()));
        }
        if self.feature_importances.len() != self.n_features {
            return Err(ClassifierError::Malformed(format!(
                "{} importances for {} features",
                self.feature_importances.len(),
                self.n_features
            )));
        }
        if self.feature_importances.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ClassifierError::Malformed("importances must be finite and non-negative".into()));
        }

        // The forest must answer with a two-class probability
        let p = self.predict_proba(&vec![0.0; self.n_features])?;
        if !(0.0..=1.0).contains(&p) {
            return Err(ClassifierError::Malformed(format!("zero-row probability {} outside [0, 1]", p)));
        }
        Ok(())
    }
}
