//! Model description handlers

use axum::{extract::State, Json};

use fire_risk_core::logic::features::LayoutInfo;
use fire_risk_core::logic::scoring::FeatureImportance;

use crate::{AppError, AppResult, AppState};
use crate::models::{FeatureDescriptor, ModelResponse};

/// Describe the loaded estimator and its input layout
pub async fn describe(State(state): State<AppState>) -> Json<ModelResponse> {
    Json(ModelResponse {
        estimator: state.scorer.describe(),
        layout: LayoutInfo::current(),
        features: FeatureDescriptor::all(),
        thresholds: state.scorer.thresholds(),
        input_policy: state.scorer.policy(),
    })
}

/// Importance per feature, in layout order
pub async fn importance(State(state): State<AppState>) -> AppResult<Json<Vec<FeatureImportance>>> {
    state
        .scorer
        .feature_importance()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Feature importances not available for this model".to_string()))
}
