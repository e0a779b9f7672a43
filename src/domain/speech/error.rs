use crate::error::AppError;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("text too large: {0}")]
    TooLarge(String),
    #[error("speech synthesis failed: {0}")]
    Dependency(String),
    #[error("speech synthesis timed out after {0:?}")]
    Timeout(Duration),
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SpeechServiceError::TooLarge(msg) => AppError::PayloadTooLarge(msg),
            SpeechServiceError::Dependency(msg) => AppError::SpeechSynthesisFailed(msg),
            SpeechServiceError::Timeout(after) => {
                AppError::GatewayTimeout(format!("speech synthesis timed out after {:?}", after))
            }
        }
    }
}
