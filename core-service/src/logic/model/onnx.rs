//! ONNX Estimator - ONNX Runtime Integration
//!
//! Serves a forest that was exported to ONNX instead of a native artifact.
//! The graph must take one float tensor `[1, 12]` in layout order and expose
//! a `[1, n_classes]` probability tensor (export with the class-map output
//! disabled so probabilities come back as a plain tensor).

use ndarray::Array2;
use parking_lot::Mutex;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use super::classifier::POSITIVE_CLASS;
use super::estimator::{Estimator, EstimatorInfo, InferenceError};

/// Output names tried, in order, when looking for the probability tensor
const PROBABILITY_OUTPUTS: &[&str] = &["probabilities", "output_probability"];

pub struct OnnxEstimator {
    /// The runtime needs exclusive access per run
    session: Mutex<Session>,
    probability_output: String,
    importances: Option<Vec<f64>>,
    source: String,
}

impl OnnxEstimator {
    /// Load ONNX model from file
    pub fn load(model_path: &str) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from: {}", model_path);

        if !std::path::Path::new(model_path).exists() {
            return Err(InferenceError(format!("Model not found: {}", model_path)));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        let estimator = Self::from_session(session, model_path.to_string())?;
        log::info!("ONNX model loaded, probability output '{}'", estimator.probability_output);
        Ok(estimator)
    }

    /// Load ONNX model from bytes
    pub fn load_from_bytes(model_bytes: &[u8]) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| InferenceError(format!("Load from memory error: {}", e)))?;

        Self::from_session(session, "<memory>".to_string())
    }

    fn from_session(session: Session, source: String) -> Result<Self, InferenceError> {
        let names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();

        let probability_output = PROBABILITY_OUTPUTS
            .iter()
            .find(|wanted| names.iter().any(|n| n == *wanted))
            .map(|s| s.to_string())
            .or_else(|| names.get(1).cloned())
            .ok_or_else(|| InferenceError(format!("No probability output among {:?}", names)))?;

        Ok(Self {
            session: Mutex::new(session),
            probability_output,
            importances: None,
            source,
        })
    }

    /// ONNX graphs do not carry importances; attach the ones from training
    pub fn with_importances(mut self, importances: Vec<f64>) -> Self {
        self.importances = Some(importances);
        self
    }
}

impl Estimator for OnnxEstimator {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let input: Vec<f32> = features.as_slice().iter().map(|&v| v as f32).collect();

        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), input)
            .map_err(|e| InferenceError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs.get(self.probability_output.as_str())
            .ok_or_else(|| InferenceError("No output".to_string()))?;

        let output_tensor = output.try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;

        let data = output_tensor.1;
        data.get(POSITIVE_CLASS)
            .map(|&p| p as f64)
            .ok_or_else(|| InferenceError(format!("Probability tensor has {} values", data.len())))
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        self.importances.clone()
    }

    fn describe(&self) -> EstimatorInfo {
        EstimatorInfo {
            kind: "onnx".to_string(),
            source: self.source.clone(),
            n_features: FEATURE_COUNT,
            n_estimators: None,
            trained_at: None,
            checksum: None,
        }
    }
}
