use crate::error::AppError;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum NarrativeServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("text generation failed: {0}")]
    Dependency(String),
    #[error("text generation timed out after {0:?}")]
    Timeout(Duration),
}

impl From<NarrativeServiceError> for AppError {
    fn from(err: NarrativeServiceError) -> Self {
        match err {
            NarrativeServiceError::Invalid(msg) => AppError::BadRequest(msg),
            NarrativeServiceError::Dependency(msg) => AppError::TextGenerationFailed(msg),
            NarrativeServiceError::Timeout(after) => {
                AppError::GatewayTimeout(format!("text generation timed out after {:?}", after))
            }
        }
    }
}
