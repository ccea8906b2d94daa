use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::core::{Pipeline, PipelineError};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GenerateResponse {
    File { file: String },
    Error { error: String },
}

pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/generate-all", post(generate_all))
        .route("/health", get(health))
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
        .with_state(AppState { pipeline })
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Accepts `{ "urls": [...] }`. Blank and non-string entries are dropped.
pub fn parse_urls(body: &[u8]) -> Vec<String> {
    let Ok(payload) = serde_json::from_slice::<Value>(body) else {
        return Vec::new();
    };

    payload
        .get("urls")
        .and_then(Value::as_array)
        .map(|urls| {
            urls.iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

async fn generate_all(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<GenerateResponse>) {
    let urls = parse_urls(&body);
    if urls.is_empty() {
        warn!("Rejected request without URLs");
        return (
            StatusCode::BAD_REQUEST,
            Json(GenerateResponse::Error {
                error: "No URLs provided.".to_string(),
            }),
        );
    }

    info!("Generating listing pack for {} URLs", urls.len());
    match state.pipeline.generate_pack(&urls).await {
        Ok(file) => (StatusCode::OK, Json(GenerateResponse::File { file })),
        Err(PipelineError::InvalidInput(message)) => (
            StatusCode::BAD_REQUEST,
            Json(GenerateResponse::Error { error: message }),
        ),
        Err(err) => {
            error!("Listing pack failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GenerateResponse::Error {
                    error: err.to_string(),
                }),
            )
        }
    }
}
