pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    health::{self, HealthState},
    llm::LlmController,
    poi::PoiController,
    tts::TtsController,
};
use crate::infrastructure::config::Config;

/// Controllers wired into the router
pub struct Controllers {
    pub health: Arc<HealthState>,
    pub llm: Arc<LlmController>,
    pub tts: Arc<TtsController>,
    pub poi: Arc<PoiController>,
}

/// Build the application router with every route and middleware layer
pub fn create_router(controllers: Controllers) -> Router {
    let health_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(controllers.health);

    let llm_routes = Router::new()
        .route("/api/v1/llm/generate", post(LlmController::generate))
        .with_state(controllers.llm);

    let tts_routes = Router::new()
        .route("/api/v1/tts/generate", post(TtsController::generate))
        .with_state(controllers.tts);

    let poi_routes = Router::new()
        .route("/api/v1/poi/nearby", get(PoiController::nearby))
        .route("/api/v1/poi/:id", get(PoiController::get_poi))
        .route("/api/v1/poi/:id/distance", get(PoiController::distance))
        .route("/api/v1/poi/:id/relevance", get(PoiController::relevance))
        .route("/api/v1/poi/:id/audio/:kind", post(PoiController::generate_audio))
        .route(
            "/api/v1/poi/:id/audio/files/:asset",
            get(PoiController::download_audio),
        )
        .with_state(controllers.poi);

    Router::new()
        .merge(health_routes)
        .merge(llm_routes)
        .merge(tts_routes)
        .merge(poi_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server and run until Ctrl-C or SIGTERM
pub async fn start_http_server(
    config: Arc<Config>,
    controllers: Controllers,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(controllers);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
