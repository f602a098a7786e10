//! History handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::{AppResult, AppState};
use crate::extract::Query;
use crate::models::{HistoryQuery, HistoryResponse, LocationsResponse};

/// Recorded predictions in insertion order
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<HistoryResponse>> {
    query.validate()?;

    let history = state.history.lock();
    let records = match query.limit {
        Some(n) => history.last(n).to_vec(),
        None => history.records().to_vec(),
    };

    Ok(Json(HistoryResponse {
        total: history.len(),
        records,
        tier_counts: history.tier_counts(),
    }))
}

/// (X, Y, tier) points for the location scatter
pub async fn locations(State(state): State<AppState>) -> Json<LocationsResponse> {
    Json(LocationsResponse {
        points: state.history.lock().locations(),
    })
}
