use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::speech::{SpeechServiceApi, TtsGenerateRequest},
    error::{AppError, AppResult},
};

pub struct TtsController {
    speech_service: Arc<dyn SpeechServiceApi>,
}

impl TtsController {
    pub fn new(speech_service: Arc<dyn SpeechServiceApi>) -> Self {
        Self { speech_service }
    }

    /// POST /api/v1/tts/generate - Convert text to WAV speech
    pub async fn generate(
        State(controller): State<Arc<TtsController>>,
        payload: Result<Json<TtsGenerateRequest>, JsonRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

        let result = controller.speech_service.synthesize(request).await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"generated_audio.wav\""),
        );
        headers.insert("X-Speaker", HeaderValue::from_static(result.speaker.as_str()));
        headers.insert("X-Sample-Rate", HeaderValue::from(result.sample_rate));

        Ok((StatusCode::OK, headers, Body::from(result.audio_data)))
    }
}
