//! Server entry point: config, MongoDB connection, router, graceful shutdown.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bottega_api::{routes, AppConfig, AppState};
use bottega_store::MongoStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Bottega API server...");

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        port = config.http_port,
        db = %config.mongodb_db,
        assistant_configured = config.gemini_api_key.is_some(),
        "Configuration loaded"
    );

    // Connect to the document store
    let store = MongoStore::connect(&config.mongodb_uri, &config.mongodb_db).await?;
    info!("Connected to MongoDB");

    // Create shared state and routes
    let state = AppState::from_mongo(&store, &config)?;
    let app = routes::router(state);

    // Bind and serve
    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
