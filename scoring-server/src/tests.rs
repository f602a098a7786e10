//! HTTP tests against the full router with fake estimators

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use fire_risk_core::logic::features::{FeatureVector, FireWeatherInput, FEATURE_COUNT};
use fire_risk_core::logic::model::{Estimator, EstimatorInfo, InferenceError};
use fire_risk_core::logic::scoring::{InputPolicy, RiskScorer};

use crate::config::Config;
use crate::{create_router, AppState};

/// p = temp / 40, clamped into [0, 1]
struct TempEstimator {
    importances: bool,
}

impl Estimator for TempEstimator {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let temp = features.get_by_name("temp").unwrap_or_default();
        Ok((temp / 40.0).clamp(0.0, 1.0))
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        self.importances
            .then(|| vec![1.0 / FEATURE_COUNT as f64; FEATURE_COUNT])
    }

    fn describe(&self) -> EstimatorInfo {
        EstimatorInfo {
            kind: "temp_fake".to_string(),
            source: "<memory>".to_string(),
            n_features: FEATURE_COUNT,
            n_estimators: None,
            trained_at: None,
            checksum: None,
        }
    }
}

/// Always returns an invalid probability
struct BrokenEstimator;

impl Estimator for BrokenEstimator {
    fn predict_probability(&self, _features: &FeatureVector) -> Result<f64, InferenceError> {
        Ok(1.5)
    }

    fn describe(&self) -> EstimatorInfo {
        EstimatorInfo {
            kind: "broken".to_string(),
            source: "<memory>".to_string(),
            n_features: FEATURE_COUNT,
            n_estimators: None,
            trained_at: None,
            checksum: None,
        }
    }
}

fn test_config() -> Config {
    Config {
        model_path: "unused.json".to_string(),
        port: 0,
        strict_input: false,
        environment: "test".to_string(),
    }
}

fn app_with(scorer: RiskScorer) -> Router {
    create_router(AppState::new(scorer, test_config()))
}

fn app() -> Router {
    app_with(RiskScorer::new(Arc::new(TempEstimator { importances: true })))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn input_with_temp(temp: f64) -> Value {
    serde_json::to_value(FireWeatherInput { temp, ..Default::default() }).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["model"]["kind"], "temp_fake");
}

#[tokio::test]
async fn test_predict_named_inputs() {
    let (status, body) = post(&app(), "/api/v1/predict", input_with_temp(20.0)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["probability"], 0.5);
    assert_eq!(body["percentage"], "50.00%");
    assert_eq!(body["tier"], "Medium");
    assert_eq!(body["label"], "MEDIUM RISK");
    assert_eq!(body["color"], "#f1c40f");
}

#[tokio::test]
async fn test_predict_tier_boundaries() {
    let app = app();

    // 16 / 40 = 0.4 exactly
    let (_, body) = post(&app, "/api/v1/predict", input_with_temp(16.0)).await;
    assert_eq!(body["tier"], "Medium");

    // 28 / 40 = 0.7 exactly
    let (_, body) = post(&app, "/api/v1/predict", input_with_temp(28.0)).await;
    assert_eq!(body["tier"], "High");

    let (_, body) = post(&app, "/api/v1/predict", input_with_temp(4.0)).await;
    assert_eq!(body["tier"], "Low");
    assert_eq!(body["color"], "#2ecc71");
}

#[tokio::test]
async fn test_predict_missing_fields_is_bad_request() {
    let app = app();

    let (status, body) = post(&app, "/api/v1/predict", json!({ "X": 5, "Y": 5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("missing field"));

    let (status, body) = post(&app, "/api/v1/predict/vector", json!({ "numbers": [1.0] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (_, history) = get(&app, "/api/v1/history").await;
    assert_eq!(history["total"], 0);
}

#[tokio::test]
async fn test_predict_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/predict")
        .header("content-type", "application/json")
        .body(Body::from("{\"X\": 5,"))
        .unwrap();
    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    // Missing content type is rejected the same way
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/predict")
        .body(Body::from(input_with_temp(20.0).to_string()))
        .unwrap();
    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_predict_vector_checks_arity() {
    let app = app();

    let mut values: Vec<f64> = FeatureVector::from(FireWeatherInput::default()).values.to_vec();
    let (status, body) = post(&app, "/api/v1/predict/vector", json!({ "values": values })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["probability"], 0.5);

    values.pop();
    let (status, body) = post(&app, "/api/v1/predict/vector", json!({ "values": values })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    // Rejected requests are not recorded
    let (_, history) = get(&app, "/api/v1/history").await;
    assert_eq!(history["total"], 1);
}

#[tokio::test]
async fn test_history_records_in_order() {
    let app = app();
    for temp in [4.0, 20.0, 36.0] {
        let (status, _) = post(&app, "/api/v1/predict", input_with_temp(temp)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get(&app, "/api/v1/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["records"][0]["Risk"], "Low");
    assert_eq!(body["records"][2]["Risk"], "High");
    assert_eq!(body["records"][1]["X"], 5.0);
    assert_eq!(body["tier_counts"]["Medium"], 1);

    let (_, body) = get(&app, "/api/v1/history?limit=2").await;
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Probability"], 0.5);
    assert_eq!(body["total"], 3);

    let (_, body) = get(&app, "/api/v1/history/locations").await;
    assert_eq!(body["points"].as_array().unwrap().len(), 3);
    assert_eq!(body["points"][2]["tier"], "High");
}

#[tokio::test]
async fn test_history_limit_validated() {
    let (status, body) = get(&app(), "/api/v1/history?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = get(&app(), "/api/v1/history?limit=5000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app(), "/api/v1/history?limit=many").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_strict_policy_rejects_out_of_domain() {
    let strict = app_with(
        RiskScorer::new(Arc::new(TempEstimator { importances: true })).with_policy(InputPolicy::Strict),
    );
    let (status, _) = post(&strict, "/api/v1/predict", input_with_temp(45.0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Pass-through scores the same input
    let (status, body) = post(&app(), "/api/v1/predict", input_with_temp(45.0)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "High");
}

#[tokio::test]
async fn test_model_description() {
    let (status, body) = get(&app(), "/api/v1/model").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estimator"]["kind"], "temp_fake");
    assert_eq!(body["layout"]["feature_count"], 12);
    assert_eq!(body["features"].as_array().unwrap().len(), 12);
    assert_eq!(body["features"][8]["name"], "temp");
    assert_eq!(body["thresholds"]["medium"], 0.4);
    assert_eq!(body["input_policy"], "pass_through");
}

#[tokio::test]
async fn test_importance() {
    let (status, body) = get(&app(), "/api/v1/model/importance").await;
    assert_eq!(status, StatusCode::OK);
    let bars = body.as_array().unwrap();
    assert_eq!(bars.len(), 12);
    assert_eq!(bars[0]["name"], "X");
    assert_eq!(bars[9]["label"], "RH");

    let without = app_with(RiskScorer::new(Arc::new(TempEstimator { importances: false })));
    let (status, _) = get(&without, "/api/v1/model/importance").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inference_failure_is_server_error() {
    let broken = app_with(RiskScorer::new(Arc::new(BrokenEstimator)));
    let (status, body) = post(&broken, "/api/v1/predict", input_with_temp(20.0)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);

    let (_, history) = get(&broken, "/api/v1/history").await;
    assert_eq!(history["total"], 0);
}

#[tokio::test]
async fn test_model_unavailable_is_service_unavailable() {
    use axum::response::IntoResponse;
    use fire_risk_core::logic::scoring::ScoringError;

    let err = crate::AppError::from(ScoringError::ModelUnavailable("missing".to_string()));
    assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
}
