use super::error::SpeechServiceError;
use super::{
    SpeechRequest, SpeechSynthesisResult, TtsGenerateRequest, VoiceSettings,
    SUPPORTED_SAMPLE_RATES,
};
use crate::infrastructure::repositories::SpeechSynthesisRepository;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

const MAX_TEXT_CHARS: usize = 10_000;

pub struct SpeechService {
    speech_repo: Arc<dyn SpeechSynthesisRepository>,
    defaults: VoiceSettings,
    timeout: Duration,
}

impl SpeechService {
    pub fn new(
        speech_repo: Arc<dyn SpeechSynthesisRepository>,
        defaults: VoiceSettings,
        timeout: Duration,
    ) -> Self {
        Self {
            speech_repo,
            defaults,
            timeout,
        }
    }

    fn resolve(&self, request: TtsGenerateRequest) -> Result<SpeechRequest, SpeechServiceError> {
        let text = request.text.trim().to_string();
        if text.is_empty() {
            return Err(SpeechServiceError::Invalid("Text cannot be empty".to_string()));
        }

        let char_count = text.chars().count();
        if char_count > MAX_TEXT_CHARS {
            return Err(SpeechServiceError::TooLarge(format!(
                "Text must be {} characters or less, got {}",
                MAX_TEXT_CHARS, char_count
            )));
        }

        let sample_rate = request.sample_rate.unwrap_or(self.defaults.sample_rate);
        if !SUPPORTED_SAMPLE_RATES.contains(&sample_rate) {
            return Err(SpeechServiceError::Invalid(format!(
                "sample_rate must be one of {:?}, got {}",
                SUPPORTED_SAMPLE_RATES, sample_rate
            )));
        }

        let speed = request.speed.unwrap_or(self.defaults.speed);
        if !speed.is_finite() || speed <= 0.0 {
            return Err(SpeechServiceError::Invalid(format!(
                "speed must be a positive number, got {}",
                speed
            )));
        }

        Ok(SpeechRequest {
            text,
            speaker: request.speaker.unwrap_or(self.defaults.speaker),
            sample_rate,
            speed,
        })
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Synthesize text to WAV audio.
    ///
    /// Missing voice parameters fall back to the configured defaults.
    async fn synthesize(
        &self,
        request: TtsGenerateRequest,
    ) -> Result<SpeechSynthesisResult, SpeechServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(
        &self,
        request: TtsGenerateRequest,
    ) -> Result<SpeechSynthesisResult, SpeechServiceError> {
        let request = self.resolve(request)?;

        tracing::info!(
            provider = self.speech_repo.provider(),
            speaker = %request.speaker,
            sample_rate = request.sample_rate,
            speed = request.speed,
            text_length = request.text.len(),
            "Speech synthesis request"
        );

        let start_time = std::time::Instant::now();
        let audio_data = tokio::time::timeout(self.timeout, self.speech_repo.synthesize(&request))
            .await
            .map_err(|_| {
                tracing::warn!(
                    provider = self.speech_repo.provider(),
                    timeout_ms = self.timeout.as_millis(),
                    "Speech synthesis timed out"
                );
                SpeechServiceError::Timeout(self.timeout)
            })?
            .map_err(SpeechServiceError::Dependency)?;

        if audio_data.is_empty() {
            return Err(SpeechServiceError::Dependency(
                "speech synthesizer returned no audio".to_string(),
            ));
        }

        tracing::info!(
            provider = self.speech_repo.provider(),
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_data.len(),
            "Speech synthesis completed"
        );

        Ok(SpeechSynthesisResult {
            audio_data,
            speaker: request.speaker,
            sample_rate: request.sample_rate,
        })
    }
}
