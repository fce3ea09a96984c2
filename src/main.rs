// poegate - OpenAI-compatible gateway for the Poe bot API
//
// Accepts Chat Completions requests, flattens the conversation into a
// single prompt, queries a Poe bot, and translates the streamed reply
// back into OpenAI wire format (buffered JSON or SSE chunks).
//
// Architecture:
// - Gateway (axum): endpoints plus buffered/incremental response assembly
// - Upstream (reqwest + SSE): the Poe bot-query client and the adapter
//   that converts transport failures into in-band response content
// - Prompt/tokens: history flattening and word-count usage reporting

mod cli;
mod config;
mod gateway;
mod openai;
mod prompt;
mod startup;
mod tokens;
mod upstream;

use anyhow::Result;
use config::{Config, LogRotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --update)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Initialize tracing/logging
    // File logging: optionally write to rotating log files in addition to stdout
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!(
        "poegate={},tower_http=debug,axum=debug",
        config.logging.level
    );

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Set up file logging if enabled (non-blocking writer with rotation)
    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            // Create log directory if it doesn't exist
            if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                // Fall back to stdout-only logging
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer())
                    .init();
                None
            } else {
                // Create rolling file appender based on configured rotation
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };

                // Wrap in non-blocking writer (writes happen in background thread)
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                // File layer uses JSON format for structured log parsing
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer())
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(non_blocking)
                            .with_ansi(false),
                    )
                    .init();

                Some(guard)
            }
        } else {
            // No file logging - stdout only
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
            None
        };

    // Graceful shutdown: Ctrl+C fires the oneshot, axum drains and exits
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let server_config = config.clone();
    let server_handle = tokio::spawn(async move {
        gateway::serve(server_config, shutdown_rx)
            .await
            .expect("Gateway server failed");
    });

    startup::print_startup(&config);
    startup::log_startup(&config);

    // Wait for Ctrl+C
    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down...");

    // Signal the gateway to shut down gracefully
    // If the send fails, the server has already shut down (which is fine)
    let _ = shutdown_tx.send(());

    // Wait for the server task to finish draining
    let _ = server_handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
