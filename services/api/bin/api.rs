//! Main Entrypoint for the Palaver API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Opening the ledger database and applying the schema.
//! 3. Initializing shared services (sentiment analyzer, rate limiter,
//!    provider client).
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use palaver_api::{config::Config, db::Ledger, provider::ProviderClient, router::create_router, state::AppState};
use palaver_core::{ratelimit::InMemoryRateLimiter, sentiment::SentimentAnalyzer};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Initialize the Ledger ---
    let ledger = Arc::new(
        Ledger::connect(&config.database_url)
            .await
            .context("Failed to open the ledger database")?,
    );
    info!("Ledger database open and schema applied.");

    // --- 4. Initialize Shared Services ---
    let rate_limiter = Arc::new(InMemoryRateLimiter::new(config.rate_limit));
    let provider = Arc::new(ProviderClient::new(
        &config.provider_base_url,
        &config.provider_api_key,
    ));
    let app_state = Arc::new(AppState {
        ledger,
        analyzer: SentimentAnalyzer::new(),
        rate_limiter,
        provider,
        config: Arc::new(config.clone()),
    });

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 6. Start Server ---
    info!(
        provider_base_url = %config.provider_base_url,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
