use async_trait::async_trait;
use parking_lot::Mutex;
use poi_narrator::domain::narrative::NarrativeRequest;
use poi_narrator::domain::speech::SpeechRequest;
use poi_narrator::infrastructure::repositories::{
    SpeechSynthesisRepository, TextGenerationRepository,
};
use std::time::Duration;

/// Text generator returning a configurable reply and recording every request
pub struct MockTextGenerator {
    reply: Mutex<Result<String, String>>,
    requests: Mutex<Vec<NarrativeRequest>>,
}

impl MockTextGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Mutex::new(Ok(reply.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_with(&self, message: &str) {
        *self.reply.lock() = Err(message.to_string());
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<NarrativeRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl TextGenerationRepository for MockTextGenerator {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, String> {
        self.requests.lock().push(request.clone());
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.reply.lock().clone()
    }
}

/// Speech synthesizer producing a small WAV-like payload per request
#[derive(Default)]
pub struct MockSpeechSynthesizer {
    requests: Mutex<Vec<SpeechRequest>>,
    fail_on: Mutex<Option<String>>,
    delay: Mutex<Duration>,
}

impl MockSpeechSynthesizer {
    /// Fail every request whose text contains `marker`
    pub fn fail_on(&self, marker: &str) {
        *self.fail_on.lock() = Some(marker.to_string());
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = delay;
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn texts(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.text.clone()).collect()
    }

    pub fn last_request(&self) -> Option<SpeechRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn audio_for(text: &str) -> Vec<u8> {
        let mut audio = b"RIFF\0\0\0\0WAVE".to_vec();
        audio.extend_from_slice(text.as_bytes());
        audio
    }
}

#[async_trait]
impl SpeechSynthesisRepository for MockSpeechSynthesizer {
    fn provider(&self) -> &'static str {
        "mock"
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, String> {
        self.requests.lock().push(request.clone());
        let delay = *self.delay.lock();
        tokio::time::sleep(delay.max(Duration::from_millis(10))).await;

        let fail_on = self.fail_on.lock().clone();
        match fail_on {
            Some(marker) if request.text.contains(&marker) => {
                Err("model server returned 500".to_string())
            }
            _ => Ok(Self::audio_for(&request.text)),
        }
    }
}
