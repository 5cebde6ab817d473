//! CliHub server: async job orchestration for a wrapped CLI.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use clihub_api::AppState;
use clihub_core::config::AppConfig;
use clihub_core::error::AppError;
use clihub_executor::CliExecutor;
use clihub_jobs::JobManager;
use clihub_webhook::WebhookSender;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CLIHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = AppConfig::load(&env)?;
    config.validate()?;

    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CliHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Command executor ─────────────────────────────────
    tracing::info!("Wrapping CLI binary '{}'", config.cli.binary);
    let executor = Arc::new(CliExecutor::new(config.cli.clone()));

    // ── Step 2: Webhook sender ───────────────────────────────────
    if config.webhooks.enabled {
        tracing::info!("Webhook notifications enabled");
    } else {
        tracing::info!("Webhook notifications disabled");
    }
    let webhooks = Arc::new(WebhookSender::new(config.webhooks.clone())?);

    // ── Step 3: Job manager + eviction loop ──────────────────────
    let manager = Arc::new(JobManager::new(&config, executor, webhooks));

    // ── Step 4: Build HTTP router ────────────────────────────────
    let state = AppState {
        config: Arc::new(config.clone()),
        manager: Arc::clone(&manager),
    };
    let app = clihub_api::build_router(state);

    // ── Step 5: Bind and serve ───────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("CliHub server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 6: Drain in-flight jobs ─────────────────────────────
    tracing::info!("Shutdown signal received, cancelling in-flight jobs...");
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    if tokio::time::timeout(grace, manager.shutdown()).await.is_err() {
        tracing::warn!(
            "graceful shutdown timed out after {}s",
            config.server.shutdown_grace_seconds
        );
    }

    tracing::info!("CliHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
