use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::narrative::{NarrativeRequest, NarrativeResponse, NarrativeServiceApi},
    error::{AppError, AppResult},
};

pub struct LlmController {
    narrative_service: Arc<dyn NarrativeServiceApi>,
}

impl LlmController {
    pub fn new(narrative_service: Arc<dyn NarrativeServiceApi>) -> Self {
        Self { narrative_service }
    }

    /// POST /api/v1/llm/generate - Generate a narrative for a place
    pub async fn generate(
        State(controller): State<Arc<LlmController>>,
        payload: Result<Json<NarrativeRequest>, JsonRejection>,
    ) -> AppResult<Json<NarrativeResponse>> {
        let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

        let text = controller.narrative_service.generate(&request).await?;

        Ok(Json(NarrativeResponse {
            poi_generated_text: text,
        }))
    }
}
