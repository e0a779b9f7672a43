use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::poi::PoiRepository;
use crate::infrastructure::repositories::AudioAssetStore;

/// Dependencies probed by the readiness check
pub struct HealthState {
    pub assets: AudioAssetStore,
    pub poi_repo: Arc<dyn PoiRepository>,
}

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "POI Narrator API" }))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

pub async fn health_ready(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let poi_count = state.poi_repo.count().await;
    match state.assets.check_writable().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "audio_storage": "writable",
                "poi_count": poi_count
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Audio storage is not writable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "audio_storage": "unwritable",
                    "poi_count": poi_count
                })),
            )
        }
    }
}
