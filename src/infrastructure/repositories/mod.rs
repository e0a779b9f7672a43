pub mod asset_repository;
pub mod openai_speech_repository;
pub mod openai_text_repository;
pub mod poi_repository;
pub mod silero_speech_repository;
pub mod speech_synthesis_repository;
pub mod text_generation_repository;

pub use asset_repository::{AssetStoreError, AudioAssetStore};
pub use openai_speech_repository::OpenAiSpeechRepository;
pub use openai_text_repository::OpenAiTextRepository;
pub use poi_repository::{InMemoryPoiRepository, PoiRecord};
pub use silero_speech_repository::SileroSpeechRepository;
pub use speech_synthesis_repository::SpeechSynthesisRepository;
pub use text_generation_repository::TextGenerationRepository;
