use super::text_generation_repository::TextGenerationRepository;
use crate::domain::narrative::{render_user_message, NarrativeRequest};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Chat-completion implementation of the text generation repository.
/// Works against any OpenAI compatible endpoint (OpenRouter by default).
pub struct OpenAiTextRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    system_prompt: String,
}

impl OpenAiTextRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, system_prompt: String) -> Self {
        Self {
            client,
            model,
            system_prompt,
        }
    }

    /// Build a client for `api_base` authenticated with `api_key`
    pub fn client_for(api_base: &str, api_key: &str) -> Client<OpenAIConfig> {
        let config = OpenAIConfig::new()
            .with_api_base(api_base)
            .with_api_key(api_key);
        Client::with_config(config)
    }
}

#[async_trait]
impl TextGenerationRepository for OpenAiTextRepository {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, String> {
        let user_message = render_user_message(request);

        tracing::info!(
            model = %self.model,
            prompt_length = self.system_prompt.len(),
            message_length = user_message.len(),
            "Calling chat completion API"
        );

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(self.system_prompt.as_str())
                    .build()
                    .map_err(|e| format!("Invalid system message: {}", e))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_message)
                    .build()
                    .map_err(|e| format!("Invalid user message: {}", e))?
                    .into(),
            ])
            .build()
            .map_err(|e| format!("Invalid chat completion request: {}", e))?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                "Chat completion API call failed"
            );
            format!("LLM error: {}", e)
        })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| "LLM returned no content".to_string())?;

        tracing::debug!(
            model = %self.model,
            content_length = content.len(),
            "Chat completion received"
        );

        Ok(content)
    }
}
