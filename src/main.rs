use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use poi_narrator::controllers::{
    health::HealthState, llm::LlmController, poi::PoiController, tts::TtsController,
};
use poi_narrator::domain::narrative::{NarrativeService, DEFAULT_SYSTEM_PROMPT};
use poi_narrator::domain::poi::{PoiRepository, PoiService};
use poi_narrator::domain::speech::SpeechService;
use poi_narrator::infrastructure::config::{Config, LogFormat, TtsProvider};
use poi_narrator::infrastructure::http::{start_http_server, Controllers};
use poi_narrator::infrastructure::repositories::{
    AudioAssetStore, InMemoryPoiRepository, OpenAiSpeechRepository, OpenAiTextRepository,
    SileroSpeechRepository, SpeechSynthesisRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting POI Narrator on {}:{}",
        config.host,
        config.port
    );

    let system_prompt = match &config.llm_prompt_path {
        Some(path) => {
            let prompt = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read LLM prompt {}: {}", path.display(), e))?;
            tracing::info!(path = %path.display(), "Loaded system prompt from file");
            prompt
        }
        None => DEFAULT_SYSTEM_PROMPT.to_string(),
    };

    let poi_repo = Arc::new(InMemoryPoiRepository::from_catalog_file(&config.poi_catalog_path)?);
    tracing::info!(
        path = %config.poi_catalog_path.display(),
        poi_count = poi_repo.count().await,
        "POI catalog loaded"
    );

    let assets = AudioAssetStore::new(config.audio_root.clone());
    if let Err(e) = assets.check_writable().await {
        tracing::warn!(error = %e, "Audio root is not writable, generation will fail");
    }

    let config = Arc::new(config);
    let timeout = config.generation_timeout();

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate provider clients and repositories
    tracing::info!(model = %config.llm_model, api_base = %config.llm_api_base, "Instantiating text generator...");
    let llm_client = Arc::new(OpenAiTextRepository::client_for(
        &config.llm_api_base,
        &config.llm_api_key,
    ));
    let text_repo = Arc::new(OpenAiTextRepository::new(
        llm_client,
        config.llm_model.clone(),
        system_prompt,
    ));

    tracing::info!(provider = ?config.tts_provider, "Instantiating speech synthesizer...");
    let speech_repo: Arc<dyn SpeechSynthesisRepository> = match config.tts_provider {
        TtsProvider::Silero => Arc::new(SileroSpeechRepository::new(
            reqwest::Client::new(),
            config.tts_base_url.clone(),
        )),
        TtsProvider::OpenAi => {
            let tts_client = Arc::new(OpenAiTextRepository::client_for(
                &config.tts_api_base,
                config.tts_api_key(),
            ));
            Arc::new(OpenAiSpeechRepository::new(
                tts_client,
                config.tts_openai_model.clone(),
            ))
        }
    };

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let narrative_service = Arc::new(NarrativeService::new(text_repo, timeout));
    let speech_service = Arc::new(SpeechService::new(speech_repo, config.voice, timeout));
    let poi_service = Arc::new(PoiService::new(
        poi_repo.clone(),
        narrative_service.clone(),
        speech_service.clone(),
        assets.clone(),
    ));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let controllers = Controllers {
        health: Arc::new(HealthState {
            assets,
            poi_repo,
        }),
        llm: Arc::new(LlmController::new(narrative_service)),
        tts: Arc::new(TtsController::new(speech_service)),
        poi: Arc::new(PoiController::new(poi_service)),
    };

    start_http_server(config, controllers).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "poi_narrator=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "poi_narrator=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
