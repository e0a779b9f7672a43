use once_cell::sync::Lazy;
use poi_narrator::controllers::{
    health::HealthState, llm::LlmController, poi::PoiController, tts::TtsController,
};
use poi_narrator::domain::narrative::NarrativeService;
use poi_narrator::domain::poi::PoiService;
use poi_narrator::domain::speech::{SpeechService, VoiceSettings};
use poi_narrator::infrastructure::http::{create_router, Controllers};
use poi_narrator::infrastructure::repositories::{AudioAssetStore, InMemoryPoiRepository};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod assertions;
pub mod fixtures;
pub mod mocks;

use api_client::TestClient;
use fixtures::{TestFixtures, CATALOG, DEFAULT_NARRATIVE};
use mocks::{MockSpeechSynthesizer, MockTextGenerator};

/// Generation timeout used by the test server
pub const TEST_GENERATION_TIMEOUT: Duration = Duration::from_millis(500);

// Log to the test writer once per test binary; RUST_LOG controls verbosity
static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "poi_narrator=warn".into()),
        )
        .with_test_writer()
        .try_init();
});

pub struct TestContext {
    pub client: TestClient,
    pub fixtures: TestFixtures,
    pub text_generator: Arc<MockTextGenerator>,
    pub speech_synthesizer: Arc<MockSpeechSynthesizer>,
    _audio_dir: TempDir,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            Lazy::force(&TRACING);

            let audio_dir = TempDir::new().expect("Failed to create audio dir");
            let assets = AudioAssetStore::new(audio_dir.path().join("audio_files"));

            let text_generator = Arc::new(MockTextGenerator::new(DEFAULT_NARRATIVE));
            let speech_synthesizer = Arc::new(MockSpeechSynthesizer::default());

            let app = create_app(
                assets.clone(),
                text_generator.clone(),
                speech_synthesizer.clone(),
            );

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(Duration::from_millis(50)).await;

            Self {
                client: TestClient::new(&base_url),
                fixtures: TestFixtures::new(assets),
                text_generator,
                speech_synthesizer,
                _audio_dir: audio_dir,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // The audio root is removed when the TempDir drops
        }
    }
}

fn create_app(
    assets: AudioAssetStore,
    text_generator: Arc<MockTextGenerator>,
    speech_synthesizer: Arc<MockSpeechSynthesizer>,
) -> axum::Router {
    let poi_repo =
        Arc::new(InMemoryPoiRepository::from_json(CATALOG).expect("Failed to load test catalog"));

    let narrative_service = Arc::new(NarrativeService::new(
        text_generator,
        TEST_GENERATION_TIMEOUT,
    ));
    let speech_service = Arc::new(SpeechService::new(
        speech_synthesizer,
        VoiceSettings::default(),
        TEST_GENERATION_TIMEOUT,
    ));
    let poi_service = Arc::new(PoiService::new(
        poi_repo.clone(),
        narrative_service.clone(),
        speech_service.clone(),
        assets.clone(),
    ));

    create_router(Controllers {
        health: Arc::new(HealthState { assets, poi_repo }),
        llm: Arc::new(LlmController::new(narrative_service)),
        tts: Arc::new(TtsController::new(speech_service)),
        poi: Arc::new(PoiController::new(poi_service)),
    })
}
