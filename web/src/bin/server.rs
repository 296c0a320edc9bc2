//! Campus Events Server
//!
//! Serves the event catalog HTTP API from an in-memory store.
//!
//! This binary:
//! - Loads configuration from `.env` and the environment
//! - Optionally loads the sample admin account and events
//! - Optionally exports metrics on `GET /metrics`
//! - Serves until Ctrl+C or SIGTERM, then drains in-flight requests
//!
//! # Usage
//!
//! ```bash
//! PORT=5000 cargo run --bin server
//! ```

use campus_events_core::{seed, CampusEvents, InMemoryStorage};
use campus_events_web::{build_router, metrics, AppState, Config};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.server.log_level).unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        address = %config.bind_address(),
        seed_sample_data = config.seed_sample_data,
        metrics_enabled = config.metrics_enabled,
        "Configuration loaded"
    );

    let storage = Arc::new(InMemoryStorage::default());
    if config.seed_sample_data {
        seed::seed_sample_data(storage.as_ref()).await?;
    }

    let mut state = AppState::new(Arc::new(CampusEvents::new(storage)));
    if config.metrics_enabled {
        state = state.with_metrics(metrics::install_recorder()?);
    }

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Server listening on {}", config.bind_address());

    // Signalled once shutdown starts, so the drain deadline can begin
    let shutdown_started = Arc::new(Notify::new());
    let server = axum::serve(listener, router).with_graceful_shutdown({
        let shutdown_started = Arc::clone(&shutdown_started);
        async move {
            shutdown_signal().await;
            shutdown_started.notify_one();
        }
    })
    .into_future();

    let timeout = config.shutdown_timeout();
    tokio::select! {
        result = server => result?,
        () = async {
            shutdown_started.notified().await;
            tokio::time::sleep(timeout).await;
        } => {
            warn!(timeout_secs = timeout.as_secs(), "Shutdown timeout elapsed, dropping open connections");
        }
    }

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (in production environments)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
