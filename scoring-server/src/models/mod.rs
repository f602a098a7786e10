//! Request and response models

pub mod prediction;
pub mod model_info;
pub mod history;

pub use prediction::{PredictionResponse, VectorRequest};
pub use model_info::{FeatureDescriptor, ModelResponse};
pub use history::{HistoryQuery, HistoryResponse, LocationsResponse};
