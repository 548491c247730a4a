//! Campus Server
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use campus_api::AppState;
use campus_auth::RevokedTokenCleanup;
use campus_core::config::AppConfig;
use campus_database::DatabasePool;
use campus_database::repositories::{RevokedTokenRepository, UserRepository};

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e:#}");
        std::process::exit(1);
    }
}

/// Load configuration for the environment named by `CAMPUS_ENV`.
fn load_configuration() -> anyhow::Result<AppConfig> {
    let env = std::env::var("CAMPUS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env).with_context(|| format!("loading configuration for '{env}'"))
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
async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Campus v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.uses_default_secret() {
        tracing::warn!("auth.secret_key is the shipped placeholder; set CAMPUS__AUTH__SECRET_KEY");
    }

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    campus_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Stores and auth components ───────────────────────
    let users = Arc::new(UserRepository::new(db.pool().clone()));
    let revoked = Arc::new(RevokedTokenRepository::new(db.pool().clone()));

    let state = AppState::new(config.clone(), users, revoked.clone())?;

    state
        .accounts
        .ensure_bootstrap_admin(&config.bootstrap_admin)
        .await
        .context("creating bootstrap admin")?;

    tokio::fs::create_dir_all(&config.server.data_dir)
        .await
        .with_context(|| format!("creating data dir '{}'", config.server.data_dir))?;

    // ── Step 3: Shutdown channel & background cleanup ────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let cleanup_handle = match config.auth.revoked_token_purge_interval_seconds {
        0 => {
            tracing::info!("Revoked token cleanup disabled");
            None
        }
        secs => Some(
            RevokedTokenCleanup::new(revoked).spawn(Duration::from_secs(secs), shutdown_rx),
        ),
    };

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app = campus_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!("Campus server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .context("serving HTTP")?;

    if let Some(handle) = cleanup_handle {
        let _ = tokio::time::timeout(Duration::from_secs(10), handle).await;
    }

    db.close().await;
    tracing::info!("Campus server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
