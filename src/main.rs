//! Guided chat - scripted site assistant
//!
//! A Rust backend running a keyword-driven dialogue state machine that
//! greets visitors, routes them through menus, and collects feedback.

mod api;
mod config;
mod dialogue;
mod runtime;

use api::{create_router, AppState};
use config::ServerConfig;
use runtime::{RuntimeManager, RuntimeSettings, TracingFeedbackSink};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guided_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ServerConfig::from_env()?;
    tracing::info!(
        port = config.port,
        idle_timeout_secs = config.idle_timeout.as_secs(),
        session_ttl_secs = config.session_ttl.as_secs(),
        pacing_scale = config.pacing_scale,
        owner = %config.directory.owner,
        "Configuration loaded"
    );

    let runtime = RuntimeManager::new(
        Arc::new(config.directory),
        RuntimeSettings {
            idle_timeout: config.idle_timeout,
            session_ttl: config.session_ttl,
            pacing_scale: config.pacing_scale,
        },
        Arc::new(TracingFeedbackSink),
    );

    // Create application state
    let state = AppState::new(runtime);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Guided chat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
