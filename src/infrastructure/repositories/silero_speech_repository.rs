use super::speech_synthesis_repository::SpeechSynthesisRepository;
use crate::domain::speech::SpeechRequest;
use async_trait::async_trait;
use serde::Serialize;

const GENERATE_PATH: &str = "/api/v1/tts/generate";

/// Body accepted by the Silero model server
#[derive(Debug, Serialize)]
struct SileroGenerateBody<'a> {
    text: &'a str,
    speaker: &'a str,
    sample_rate: u32,
    speed: f32,
}

/// Speech synthesis backed by a Silero model served over HTTP
pub struct SileroSpeechRepository {
    client: reqwest::Client,
    base_url: String,
}

impl SileroSpeechRepository {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }
}

#[async_trait]
impl SpeechSynthesisRepository for SileroSpeechRepository {
    fn provider(&self) -> &'static str {
        "silero"
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, String> {
        let endpoint = self.endpoint();
        let body = SileroGenerateBody {
            text: &request.text,
            speaker: request.speaker.as_str(),
            sample_rate: request.sample_rate,
            speed: request.speed,
        };

        tracing::info!(
            endpoint = %endpoint,
            speaker = %request.speaker,
            sample_rate = request.sample_rate,
            text_length = request.text.len(),
            "Calling Silero model server"
        );

        let response = self
            .client
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, endpoint = %endpoint, "Silero request failed");
                format!("Silero request error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                detail = %detail,
                "Silero model server returned an error"
            );
            return Err(format!("Silero returned {}: {}", status, detail));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| format!("Silero response read error: {}", e))?;

        tracing::debug!(audio_size = audio.len(), "Silero audio received");

        Ok(audio.to_vec())
    }
}
