use crate::domain::speech::SpeechRequest;
use async_trait::async_trait;

/// Repository for speech synthesis.
/// Abstracts the underlying TTS model (Silero server, OpenAI speech, etc.)
///
/// Implementations are responsible for:
/// - Mapping the requested speaker onto a provider voice
/// - Returning WAV encoded audio
#[async_trait]
pub trait SpeechSynthesisRepository: Send + Sync {
    /// Short provider name used in logs and health output
    fn provider(&self) -> &'static str;

    /// Synthesize text to speech
    ///
    /// Returns WAV audio ready to be stored or streamed
    ///
    /// # Errors
    /// Returns error if synthesis fails or the model is unavailable
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, String>;
}
