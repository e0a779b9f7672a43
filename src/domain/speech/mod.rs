pub mod error;
pub mod service;

pub use error::SpeechServiceError;
pub use service::{SpeechService, SpeechServiceApi};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sample rates the speech model can render
pub const SUPPORTED_SAMPLE_RATES: [u32; 3] = [8_000, 24_000, 48_000];

/// Voices offered by the speech model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    #[default]
    Aidar,
    Baya,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Aidar => "aidar",
            Speaker::Baya => "baya",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Speaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aidar" => Ok(Speaker::Aidar),
            "baya" => Ok(Speaker::Baya),
            other => Err(format!("speaker must be one of [aidar, baya], got '{}'", other)),
        }
    }
}

/// Voice parameters applied when a request does not override them
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct VoiceSettings {
    pub speaker: Speaker,
    pub sample_rate: u32,
    /// Length scale, above 1.0 is slower
    pub speed: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            speaker: Speaker::Aidar,
            sample_rate: 24_000,
            speed: 1.2,
        }
    }
}

/// Fully resolved input for a speech synthesizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub speaker: Speaker,
    pub sample_rate: u32,
    pub speed: f32,
}

/// Request for POST /api/v1/tts/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsGenerateRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<Speaker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}

/// Synthesized audio plus the voice it was rendered with
#[derive(Debug, Clone)]
pub struct SpeechSynthesisResult {
    pub audio_data: Vec<u8>,
    pub speaker: Speaker,
    pub sample_rate: u32,
}
