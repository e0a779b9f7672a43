use crate::domain::speech::{Speaker, VoiceSettings};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Text generation
    pub llm_api_base: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub llm_prompt_path: Option<PathBuf>,
    // Speech synthesis
    pub tts_provider: TtsProvider,
    pub tts_base_url: String,
    pub tts_api_base: String,
    pub tts_api_key: Option<String>,
    pub tts_openai_model: String,
    pub voice: VoiceSettings,
    // Storage
    pub audio_root: PathBuf,
    pub poi_catalog_path: PathBuf,
    pub generation_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Silero,
    OpenAi,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let var_or = |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_string());

        let voice_defaults = VoiceSettings::default();

        let config = Config {
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "8080").parse()?,
            environment: match var_or("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match var_or("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            llm_api_base: var_or("LLM_API_BASE", "https://openrouter.ai/api/v1"),
            llm_api_key: var("LLM_API_KEY").ok_or("LLM_API_KEY must be set")?,
            llm_model: var_or("LLM_MODEL", "amazon/nova-2-lite-v1:free"),
            llm_prompt_path: var("LLM_PROMPT_PATH").map(PathBuf::from),
            tts_provider: match var_or("TTS_PROVIDER", "silero").to_lowercase().as_str() {
                "silero" => TtsProvider::Silero,
                "openai" => TtsProvider::OpenAi,
                other => {
                    return Err(format!("TTS_PROVIDER must be silero or openai, got '{}'", other).into())
                }
            },
            tts_base_url: var_or("TTS_BASE_URL", "http://127.0.0.1:8001"),
            tts_api_base: var_or("TTS_API_BASE", "https://api.openai.com/v1"),
            tts_api_key: var("TTS_API_KEY"),
            tts_openai_model: var_or("TTS_OPENAI_MODEL", "tts-1"),
            voice: VoiceSettings {
                speaker: match var("TTS_SPEAKER") {
                    Some(speaker) => speaker.parse::<Speaker>()?,
                    None => voice_defaults.speaker,
                },
                sample_rate: match var("TTS_SAMPLE_RATE") {
                    Some(rate) => rate.parse()?,
                    None => voice_defaults.sample_rate,
                },
                speed: match var("TTS_SPEED") {
                    Some(speed) => speed.parse()?,
                    None => voice_defaults.speed,
                },
            },
            audio_root: var_or("AUDIO_ROOT", "poi_files/audio_files").into(),
            poi_catalog_path: var_or("POI_CATALOG_PATH", "poi_files/catalog.json").into(),
            generation_timeout_secs: var_or("GENERATION_TIMEOUT_SECS", "60").parse()?,
        };

        Ok(config)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Key for the OpenAI speech provider, falling back to the LLM key
    pub fn tts_api_key(&self) -> &str {
        self.tts_api_key.as_deref().unwrap_or(&self.llm_api_key)
    }
}
