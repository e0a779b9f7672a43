use super::speech_synthesis_repository::SpeechSynthesisRepository;
use crate::domain::speech::{Speaker, SpeechRequest};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
const MAX_INPUT_CHARS: usize = 4096;

/// OpenAI speech implementation of the speech synthesis repository
pub struct OpenAiSpeechRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiSpeechRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    /// OpenAI voice closest to each model speaker
    fn voice_for_speaker(speaker: Speaker) -> Voice {
        match speaker {
            Speaker::Aidar => Voice::Onyx, // Low male voice
            Speaker::Baya => Voice::Nova,  // Female voice
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }
}

#[async_trait]
impl SpeechSynthesisRepository for OpenAiSpeechRepository {
    fn provider(&self) -> &'static str {
        "openai"
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, String> {
        let char_count = request.text.chars().count();
        if char_count > MAX_INPUT_CHARS {
            return Err(format!(
                "OpenAI speech input is limited to {} characters, got {}",
                MAX_INPUT_CHARS, char_count
            ));
        }

        let voice = Self::voice_for_speaker(request.speaker);
        let text_preview: String = request.text.chars().take(200).collect();

        tracing::info!(
            model = %self.model,
            speaker = %request.speaker,
            voice = ?voice,
            speed = request.speed,
            text_length = request.text.len(),
            text_preview = %text_preview,
            "Calling OpenAI speech API"
        );
        // Output sample rate is fixed by the provider
        tracing::debug!(
            requested_sample_rate = request.sample_rate,
            "OpenAI speech ignores the requested sample rate"
        );

        let speech_request = CreateSpeechRequest {
            model: self.speech_model(),
            input: request.text.clone(),
            voice,
            response_format: Some(SpeechResponseFormat::Wav),
            speed: Some(request.speed),
        };

        let response = self
            .client
            .audio()
            .speech(speech_request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    speaker = %request.speaker,
                    text_length = request.text.len(),
                    "OpenAI speech API call failed"
                );
                format!("OpenAI TTS error: {}", e)
            })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "OpenAI speech audio received successfully"
        );

        Ok(audio_bytes)
    }
}
