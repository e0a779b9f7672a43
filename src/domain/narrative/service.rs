use super::error::NarrativeServiceError;
use super::{normalize_output, NarrativeRequest};
use crate::infrastructure::repositories::TextGenerationRepository;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub struct NarrativeService {
    text_repo: Arc<dyn TextGenerationRepository>,
    timeout: Duration,
}

impl NarrativeService {
    pub fn new(text_repo: Arc<dyn TextGenerationRepository>, timeout: Duration) -> Self {
        Self { text_repo, timeout }
    }
}

#[async_trait]
pub trait NarrativeServiceApi: Send + Sync {
    /// Generate a narrative for a place from its name, description and facts.
    ///
    /// The result has blank-line paragraph breaks collapsed and is never empty.
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeServiceError>;
}

#[async_trait]
impl NarrativeServiceApi for NarrativeService {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeServiceError> {
        if request.name.trim().is_empty() && request.description.trim().is_empty() {
            return Err(NarrativeServiceError::Invalid(
                "poi_name or poi_description must be provided".to_string(),
            ));
        }

        tracing::info!(
            poi_name = %request.name,
            description_length = request.description.len(),
            fact_count = request.facts.len(),
            "Narrative generation request"
        );

        let start_time = std::time::Instant::now();
        let raw = tokio::time::timeout(self.timeout, self.text_repo.generate(request))
            .await
            .map_err(|_| {
                tracing::warn!(
                    poi_name = %request.name,
                    timeout_ms = self.timeout.as_millis(),
                    "Narrative generation timed out"
                );
                NarrativeServiceError::Timeout(self.timeout)
            })?
            .map_err(NarrativeServiceError::Dependency)?;

        let text = normalize_output(&raw);
        if text.is_empty() {
            return Err(NarrativeServiceError::Dependency(
                "text generator returned an empty narrative".to_string(),
            ));
        }

        tracing::info!(
            poi_name = %request.name,
            latency_ms = start_time.elapsed().as_millis(),
            narrative_length = text.len(),
            "Narrative generated"
        );

        Ok(text)
    }
}
