//! Prediction handlers
//!
//! Every successful prediction is appended to the process history.

use axum::extract::State;

use fire_risk_core::logic::features::{FeatureVector, FireWeatherInput};
use fire_risk_core::logic::scoring::{RiskAssessment, ScoringError};

use crate::{AppState, AppResult};
use crate::extract::Json;
use crate::models::{PredictionResponse, VectorRequest};

/// Score named inputs
pub async fn predict(
    State(state): State<AppState>,
    Json(input): Json<FireWeatherInput>,
) -> AppResult<Json<PredictionResponse>> {
    let features = FeatureVector::from(input);
    let assessment = score_and_record(&state, &features)?;
    Ok(Json(assessment.into()))
}

/// Score raw values in layout order
pub async fn predict_vector(
    State(state): State<AppState>,
    Json(req): Json<VectorRequest>,
) -> AppResult<Json<PredictionResponse>> {
    let features = FeatureVector::from_slice(&req.values).map_err(ScoringError::from)?;
    let assessment = score_and_record(&state, &features)?;
    Ok(Json(assessment.into()))
}

fn score_and_record(state: &AppState, features: &FeatureVector) -> AppResult<RiskAssessment> {
    let assessment = state.scorer.score(features)?;

    let mut history = state.history.lock();
    *history = std::mem::take(&mut *history).record(features, &assessment);

    tracing::info!(
        probability = assessment.probability,
        tier = %assessment.tier,
        history_len = history.len(),
        "Prediction recorded"
    );

    Ok(assessment)
}
