use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Text too large: {0}")]
    PayloadTooLarge(String),

    #[error("Text generation failed: {0}")]
    TextGenerationFailed(String),

    #[error("Speech synthesis failed: {0}")]
    SpeechSynthesisFailed(String),

    #[error("Audio asset write failed: {0}")]
    AssetWriteFailed(String),

    #[error("Audio asset resolution failed: {0}")]
    AssetResolutionAmbiguous(String),

    #[error("Generation timed out: {0}")]
    GatewayTimeout(String),

    #[error("Partial failure: {message}")]
    PartialFailure {
        message: String,
        details: serde_json::Value,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::TextGenerationFailed(_)
            | Self::SpeechSynthesisFailed(_)
            | Self::PartialFailure { .. } => StatusCode::BAD_GATEWAY,
            Self::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::AssetWriteFailed(_) | Self::AssetResolutionAmbiguous(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::TextGenerationFailed(_) => "text_generation_failed",
            Self::SpeechSynthesisFailed(_) => "speech_synthesis_failed",
            Self::AssetWriteFailed(_) => "asset_write_failed",
            Self::AssetResolutionAmbiguous(_) => "asset_resolution_ambiguous",
            Self::GatewayTimeout(_) => "generation_timed_out",
            Self::PartialFailure { .. } => "partial_failure",
            Self::Internal(_) => "internal",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let details = match self {
            Self::PartialFailure { details, .. } => Some(details.clone()),
            _ => None,
        };
        ErrorResponse {
            kind: self.kind().to_string(),
            message: self.to_string(),
            details,
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                kind = self.kind(),
                status = %status.as_u16(),
                "Request failed"
            );
        } else {
            tracing::warn!(
                error = %self,
                kind = self.kind(),
                status = %status.as_u16(),
                "Request rejected"
            );
        }

        (status, Json(self.to_response())).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
