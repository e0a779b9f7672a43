use crate::domain::narrative::NarrativeRequest;
use async_trait::async_trait;

/// Repository for narrative text generation.
/// Abstracts the underlying LLM provider (OpenRouter, OpenAI, any compatible API)
///
/// Implementations are responsible for:
/// - Sending the system prompt and the labeled user message
/// - Returning the raw narrative text of the first completion choice
#[async_trait]
pub trait TextGenerationRepository: Send + Sync {
    /// Generate a narrative for a place
    ///
    /// # Errors
    /// Returns error if the provider is unreachable, rejects the request or
    /// returns no content
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, String>;
}
