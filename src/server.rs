//! HTTP surface for the generative risk analyzer.
//!
//! Two endpoints: `POST /analyze` runs one assessment round trip and
//! `GET /resources` serves the static crisis-resource table. The server
//! starts even without an API key; analysis requests then fail with a
//! configuration error so the resource endpoint stays available.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::risk::{recommendations_for, resources, RiskAnalyzer, API_KEY_ENV};

/// Shared server state.
///
/// The analyzer is absent when no API key was configured at startup.
pub struct AppState {
    analyzer: Option<RiskAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: Option<RiskAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Builds state from the environment, tolerating a missing key.
    pub fn from_env() -> Self {
        match RiskAnalyzer::from_env() {
            Ok(analyzer) => Self::new(Some(analyzer)),
            Err(e) => {
                log::warn!("Analyzer unavailable: {}", e);
                Self::new(None)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    text: String,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/resources", get(crisis_resources))
        .with_state(Arc::new(state))
}

/// Binds the address and serves requests until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Risk analysis server listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(analyzer) = state.analyzer.as_ref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "API key not configured",
                "message": format!("Please set {} environment variable", API_KEY_ENV),
            })),
        );
    };

    if request.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "No text provided",
                "message": "Please enter some text to analyze",
            })),
        );
    }

    match analyzer.analyze(&request.text).await {
        Ok(record) => {
            let recommendations = recommendations_for(record.assessment.risk_level.as_str());
            (
                StatusCode::OK,
                Json(json!({
                    "assessment": record,
                    "recommendations": recommendations,
                    "resources": resources(),
                })),
            )
        }
        Err(e) => {
            log::error!("Analysis request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Analysis failed",
                    "message": e.to_string(),
                })),
            )
        }
    }
}

async fn crisis_resources(State(state): State<Arc<AppState>>) -> Json<Value> {
    if state.analyzer.is_none() {
        return Json(json!({}));
    }
    Json(json!(resources()))
}
