//! Relay server setup and lifecycle

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::AppConfig;

/// Shared state for the relay
#[derive(Clone)]
pub struct RelayState {
    pub config: Arc<AppConfig>,
    pub http_client: reqwest::Client,
}

/// Build the HTTP client used for all upstream calls. Timeouts are applied
/// per request from each upstream's configuration.
fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(10)
        .build()
}

/// Build the relay router: the three relay routes, a health probe, and the
/// static frontend as the fallback service.
pub fn build_router(state: RelayState) -> Router {
    let frontend_dir = state.config.server.frontend_dir.clone();

    Router::new()
        .route("/health", get(health_handler))
        .route("/voices", get(routes::list_voices))
        .route("/generate", post(routes::generate_speech))
        .route("/chat", post(routes::relay_chat))
        .fallback_service(ServeDir::new(frontend_dir))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the relay server
pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let http_client = build_http_client()?;

    if config.tts.api_key.is_none() {
        tracing::warn!("No TTS credential configured; synthesis calls will go out unauthenticated");
    }
    if config.chat.api_key.is_none() {
        tracing::warn!("No chat credential configured; completion calls will go out unauthenticated");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = RelayState {
        config: Arc::new(config),
        http_client,
    };

    tracing::info!("TTS upstream: {}", state.config.tts.base_url());
    tracing::info!("Chat upstream: {}", state.config.chat.base_url());
    tracing::info!("Serving frontend from {:?}", state.config.server.frontend_dir);

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("voice-relay listening on {}", addr);

    Ok(axum::serve(listener, app).await?)
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}
