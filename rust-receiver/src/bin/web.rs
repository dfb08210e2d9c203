//! MNS Receiver Web Server - authenticated notification endpoint.
//!
//! This binary provides a thin web server that:
//! - Receives topic push notifications from the messaging provider
//! - Verifies the request signature against the provider's signing cert
//! - Decodes the notification body and answers with the mapped status

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mns_receiver::web::{health, topic_notification, AppState};
use mns_receiver::{Config, HttpCertificateFetcher, TopicReceiver};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        cert_fetch_timeout_ms = config.cert_fetch_timeout_ms,
        content_format = %config.content_format,
        "config_loaded"
    );

    // Build the receiver around an HTTP certificate fetcher
    let certs = Arc::new(HttpCertificateFetcher::new(Duration::from_millis(
        config.cert_fetch_timeout_ms,
    )));
    let receiver = TopicReceiver::new(certs, config.content_format);
    let state = AppState::new(receiver);

    // Build the router
    let app = Router::new()
        .route("/health", get(health))
        .route("/notifications", post(topic_notification))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
