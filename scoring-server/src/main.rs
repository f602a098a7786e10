//! Forest Fire Risk Scoring Server
//!
//! Serves fire risk assessments from a trained model artifact.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   FIRE RISK SCORING                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌──────────────────────┐  │
//! │  │  API      │  │  RiskScorer  │  │  Prediction History  │  │
//! │  │  (Axum)   │─▶│  (Arc, RO)   │  │  (Mutex)             │  │
//! │  └─────┬─────┘  └──────┬───────┘  └──────────────────────┘  │
//! │        │               ▼                                    │
//! │        │        ┌─────────────┐                             │
//! │        │        │  Estimator  │  forest artifact / ONNX     │
//! │        │        └─────────────┘                             │
//! └────────┴────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;
mod extract;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use parking_lot::Mutex;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fire_risk_core::logic::scoring::{PredictionHistory, RiskScorer};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fire_risk_server=debug,fire_risk_core=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Fire Risk Scoring Server starting...");
    tracing::info!("Model: {}", config.model_path);

    // Load the model once; without it nothing can be scored
    let scorer = load_scorer(&config)
        .with_context(|| format!("Failed to load model from {}", config.model_path))?
        .with_policy(config.input_policy());

    let info = scorer.describe();
    tracing::info!(
        kind = %info.kind,
        trees = ?info.n_estimators,
        policy = ?scorer.policy(),
        "Model loaded"
    );

    // Build application state
    let state = AppState::new(scorer, config.clone());

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "onnx")]
fn load_scorer(config: &config::Config) -> anyhow::Result<RiskScorer> {
    if config.model_path.ends_with(".onnx") {
        return Ok(RiskScorer::from_onnx(&config.model_path, None)?);
    }
    Ok(RiskScorer::from_artifact(&config.model_path)?)
}

#[cfg(not(feature = "onnx"))]
fn load_scorer(config: &config::Config) -> anyhow::Result<RiskScorer> {
    Ok(RiskScorer::from_artifact(&config.model_path)?)
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<RiskScorer>,
    /// Every prediction since startup. Grows for the life of the process
    /// and is dropped on restart; reads are capped by `?limit`.
    pub history: Arc<Mutex<PredictionHistory>>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(scorer: RiskScorer, config: config::Config) -> Self {
        Self {
            scorer: Arc::new(scorer),
            history: Arc::new(Mutex::new(PredictionHistory::new())),
            config,
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Model
        .route("/api/v1/model", get(handlers::model::describe))
        .route("/api/v1/model/importance", get(handlers::model::importance))

        // Prediction
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route("/api/v1/predict/vector", post(handlers::predict::predict_vector))

        // History
        .route("/api/v1/history", get(handlers::history::list))
        .route("/api/v1/history/locations", get(handlers::history::locations));

    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
