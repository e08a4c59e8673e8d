// API Server Binary Entry Point
//
// Purpose: Start the Axum API server for name recommendations
// Usage: cargo run --bin api_server

use name_composer_rust::{AppState, ReferenceData, ServerConfig, create_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "name_composer_rust=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = ServerConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  DATA_DIR: {}", config.data_dir.as_ref().map(|d| d.display().to_string()).unwrap_or_else(|| "<embedded>".to_string()));
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  CANDIDATE_COUNT: {}", config.policy.candidate_count);
    tracing::info!("  OTHER_GENDER_BUCKET: {:?}", config.policy.other_gender_bucket);

    // Broken tables stop startup rather than degrading every request
    let reference = ReferenceData::resolve(config.data_dir.as_deref())?;
    tracing::info!("Reference data loaded: {:?}", reference.summary());

    let state = AppState::new(Arc::new(reference), config.policy);

    // Create router with all endpoints and middleware
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}
