//! Central Configuration Constants
//!
//! Single source of truth for training and scoring defaults.

/// Default location of the trained model artifact
pub const DEFAULT_MODEL_PATH: &str = "data/forest_fire_model.json";

/// Default location of the training dataset
pub const DEFAULT_DATA_PATH: &str = "data/forestfires.csv";

/// Trees in the forest
pub const DEFAULT_N_ESTIMATORS: usize = 100;

/// Seed shared by the split and the forest
pub const DEFAULT_RANDOM_STATE: u64 = 42;

/// Held-out share for evaluation
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Probability at which risk becomes Medium
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// Probability at which risk becomes High
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Forest Fire Risk";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model artifact path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get training dataset path from environment or use default
pub fn get_data_path() -> String {
    std::env::var("DATA_PATH")
        .unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_ordered() {
        assert!(0.0 < MEDIUM_RISK_THRESHOLD);
        assert!(MEDIUM_RISK_THRESHOLD < HIGH_RISK_THRESHOLD);
        assert!(HIGH_RISK_THRESHOLD < 1.0);
    }
}
