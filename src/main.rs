//! Tokentally - provider-aware token counting service
//!
//! This is the main entry point for the Tokentally HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::{info, warn};

use tokentally::{metrics, routes};
use tokentally::tokens::CounterStrategy;
use tokentally::{AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tokentally=info,tower_http=info".into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true);
    if std::env::var("TOKENTALLY_LOG_FORMAT").is_ok_and(|v| v == "json") {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!("Starting Tokentally");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        default_provider = %config.default_provider,
        reference_model = %config.reference_model,
        cache_encoders = config.cache_encoders,
        "Configuration loaded successfully"
    );

    // Initialize metrics
    metrics::init_metrics();
    info!("Metrics initialized");

    // Initialize application state
    let state = Arc::new(AppState::new(config.clone()));
    info!("Application state initialized");

    // Warm the encoders; failures only mean those counts report 0
    let service = Arc::clone(&state.token_service);
    tokio::task::spawn_blocking(move || {
        for strategy in [CounterStrategy::SchemeA, CounterStrategy::VendorC] {
            if let Err(e) = service.check_encoder(strategy) {
                warn!(strategy = strategy.name(), error = %e, "Encoder unavailable");
            }
        }
    })
    .await?;

    // Build the router
    let app = routes::create_router(state.clone());

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {}", addr);

    // Create listener
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Tokentally shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating shutdown");
        }
    }
}
