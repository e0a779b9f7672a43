use super::AssetKind;
use crate::domain::narrative::NarrativeServiceError;
use crate::domain::speech::SpeechServiceError;
use crate::error::AppError;
use crate::infrastructure::repositories::AssetStoreError;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PoiServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error("text generation failed: {0}")]
    TextGenerationFailed(String),
    #[error("speech synthesis failed: {0}")]
    SpeechSynthesisFailed(String),
    #[error("asset write failed: {0}")]
    AssetWriteFailed(String),
    #[error("asset resolution ambiguous: {0}")]
    AssetResolutionAmbiguous(String),
    #[error("generation timed out: {0}")]
    GenerationTimedOut(String),
    #[error("{} of {} audio assets failed", failed.len(), failed.len() + ready.len())]
    PartialFailure {
        ready: Vec<PathBuf>,
        failed: Vec<FailedAsset>,
    },
}

impl PoiServiceError {
    /// Stable snake_case name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::TextGenerationFailed(_) => "text_generation_failed",
            Self::SpeechSynthesisFailed(_) => "speech_synthesis_failed",
            Self::AssetWriteFailed(_) => "asset_write_failed",
            Self::AssetResolutionAmbiguous(_) => "asset_resolution_ambiguous",
            Self::GenerationTimedOut(_) => "generation_timed_out",
            Self::PartialFailure { .. } => "partial_failure",
        }
    }
}

/// An asset that could not be produced, reported on partial failure
#[derive(Debug, Clone, Serialize)]
pub struct FailedAsset {
    pub asset: String,
    pub kind: String,
    pub message: String,
}

impl FailedAsset {
    pub fn new(asset: AssetKind, err: &PoiServiceError) -> Self {
        Self {
            asset: asset.file_stem(),
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

// Text handed to the ports comes from the catalog, never from the caller, so a
// rejected input is a generation failure rather than a bad request.
impl From<NarrativeServiceError> for PoiServiceError {
    fn from(err: NarrativeServiceError) -> Self {
        let message = err.to_string();
        match err {
            NarrativeServiceError::Invalid(msg) => PoiServiceError::TextGenerationFailed(msg),
            NarrativeServiceError::Dependency(msg) => PoiServiceError::TextGenerationFailed(msg),
            NarrativeServiceError::Timeout(_) => PoiServiceError::GenerationTimedOut(message),
        }
    }
}

impl From<SpeechServiceError> for PoiServiceError {
    fn from(err: SpeechServiceError) -> Self {
        let message = err.to_string();
        match err {
            SpeechServiceError::Invalid(msg) | SpeechServiceError::TooLarge(msg) => {
                PoiServiceError::SpeechSynthesisFailed(msg)
            }
            SpeechServiceError::Dependency(msg) => PoiServiceError::SpeechSynthesisFailed(msg),
            SpeechServiceError::Timeout(_) => PoiServiceError::GenerationTimedOut(message),
        }
    }
}

impl From<AssetStoreError> for PoiServiceError {
    fn from(err: AssetStoreError) -> Self {
        let message = err.to_string();
        match err {
            AssetStoreError::Write { .. } => PoiServiceError::AssetWriteFailed(message),
            AssetStoreError::NotFound(_) => PoiServiceError::NotFound(message),
            AssetStoreError::Resolution { .. } | AssetStoreError::Read { .. } => {
                PoiServiceError::AssetResolutionAmbiguous(message)
            }
        }
    }
}

impl From<PoiServiceError> for AppError {
    fn from(err: PoiServiceError) -> Self {
        let message = err.to_string();
        match err {
            PoiServiceError::InvalidArgument(msg) => AppError::BadRequest(msg),
            PoiServiceError::NotFound(_) => AppError::NotFound(message),
            PoiServiceError::TextGenerationFailed(msg) => AppError::TextGenerationFailed(msg),
            PoiServiceError::SpeechSynthesisFailed(msg) => AppError::SpeechSynthesisFailed(msg),
            PoiServiceError::AssetWriteFailed(msg) => AppError::AssetWriteFailed(msg),
            PoiServiceError::AssetResolutionAmbiguous(msg) => AppError::AssetResolutionAmbiguous(msg),
            PoiServiceError::GenerationTimedOut(msg) => AppError::GatewayTimeout(msg),
            PoiServiceError::PartialFailure { ready, failed } => {
                let ready: Vec<String> = ready.iter().map(|p| p.display().to_string()).collect();
                AppError::PartialFailure {
                    message,
                    details: serde_json::json!({
                        "ready": ready,
                        "failed": failed,
                    }),
                }
            }
        }
    }
}
