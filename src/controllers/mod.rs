pub mod health;
pub mod llm;
pub mod poi;
pub mod tts;
