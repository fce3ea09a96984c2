//! HTTP gateway translating chat completions onto the bot protocol
//!
//! Request flow: a handler composes the flat prompt, opens exactly one
//! upstream query through the adapter, and hands the resulting fragment
//! stream to an assembler. Nothing here is shared mutably between
//! requests; everything a request touches is request-scoped.

mod assembler;
mod error;
mod handlers;
mod state;
mod testpage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::upstream::{BotTransport, PoeClient};
use state::GatewayState;

/// Build the gateway router
///
/// CORS is permissive: the endpoints are meant to be callable straight
/// from browser pages on any origin, the embedded test page included.
pub fn router(transport: Arc<dyn BotTransport>, default_api_key: String) -> Router {
    let state = GatewayState {
        transport,
        default_api_key,
    };

    Router::new()
        .route("/v1/chat/completions", post(handlers::chat_completions))
        .route("/stream-response", get(handlers::stream_response))
        .route("/v1/models", get(handlers::list_models))
        .route("/", get(handlers::test_page))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway server
///
/// Builds the shared upstream client, binds, and serves until the
/// shutdown signal fires.
pub async fn serve(config: Config, shutdown_rx: oneshot::Receiver<()>) -> Result<()> {
    // One connection pool shared by every upstream query
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(300)) // 5 minute cap on a single bot response
        .pool_max_idle_per_host(10)
        // Force HTTP/1.1; some event-stream endpoints reset HTTP/2 connections
        .http1_only()
        .build()
        .context("Failed to create HTTP client")?;

    let transport = Arc::new(PoeClient::new(client, config.api_url.clone()));
    let app = router(transport, config.default_api_key.clone());

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!("Gateway listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
        .context("Gateway server error")?;

    tracing::info!("Gateway shut down gracefully");
    Ok(())
}
