//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Connects to the database and prepares the schema
//! - Starts the HTTP server with graceful shutdown support

use std::process;
use std::time::Duration;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use inventory::config::Config;
use inventory::database::{check_connection, create_pool, ensure_schema, AppState};
use inventory::route::create_app;

/// Pause before exiting on a fatal startup error so buffered logs are written
const FATAL_EXIT_DELAY: Duration = Duration::from_secs(1);

/// Application entry point
///
/// 1. Loads environment variables from .env file
/// 2. Reads configuration (see [`Config`])
/// 3. Opens the connection pool; an unreachable database is fatal
/// 4. Creates missing tables; a failure here is logged and startup continues
/// 5. Starts the HTTP server with graceful shutdown handling
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("inventory=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env();

    if config.database_ssl {
        tracing::info!("DATABASE_SSL requested; the embedded database has no network transport to encrypt");
    }

    let pool = match create_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => fatal("failed to open database", &e).await,
    };

    if let Err(e) = check_connection(&pool).await {
        return fatal("database is unreachable", &e).await;
    }

    ensure_schema(&pool).await;

    let app = create_app(AppState::new(pool), &config);

    let addr = config.bind_addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => fatal("failed to bind listener", &e).await,
    };

    tracing::info!(%addr, database = %config.database_url, "🚀 inventory server listening");

    // The server will continue running until it receives SIGTERM or SIGINT
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
    }
}

/// Logs a startup error, waits for the log to flush, and exits
///
/// Never returns; the type parameter lets it stand in for any value.
async fn fatal<T>(context: &str, err: &dyn std::fmt::Display) -> T {
    tracing::error!(error = %err, "{context}");
    tokio::time::sleep(FATAL_EXIT_DELAY).await;
    process::exit(1);
}

/// Handles graceful shutdown signals
///
/// Returns when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received. Open
/// connections are allowed to complete before the process exits.
async fn shutdown_signal() {
    // Handle Ctrl+C (SIGINT)
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    // Handle SIGTERM on Unix systems (Linux, macOS)
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    // On non-Unix systems (Windows), only handle Ctrl+C
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // Wait for either signal to be received
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("🛑 Shutdown signal received, stopping server.");
}
