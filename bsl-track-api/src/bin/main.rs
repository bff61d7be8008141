use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use bsl_track_api::api::routes::create_app;
use bsl_track_api::api::AppState;
use bsl_track_api::config::Settings;
use bsl_track_data::database::{DatabaseConfig, DatabasePool};
use bsl_track_data::repository::SqliteMeasurementRepository;

/// The main entry point for the BSL Track API server
///
/// This function:
/// 1. Initializes environment variables from the .env file
/// 2. Sets up tracing for logging
/// 3. Loads the settings and opens the database pool (running migrations)
/// 4. Creates and starts the Axum web application
/// 5. Handles graceful shutdown
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    // Initialize tracing for structured logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_ansi(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stdout),
        )
        .with(env_filter)
        .init();

    // Settings are loaded once and passed explicitly from here on
    let settings = Settings::from_env();
    info!(
        "Starting {} v{}",
        settings.service_name, settings.service_version
    );

    // Open the database pool; this also runs the schema migrations
    let db_config = DatabaseConfig::from_env();
    let pool = DatabasePool::open(&settings.db_path, &db_config)
        .context("Failed to initialize database pool")?;
    info!("Database pool initialized successfully");

    let port = settings.port;
    let state = AppState {
        settings: Arc::new(settings),
        measurements: Arc::new(SqliteMeasurementRepository::new(pool)),
    };

    // Create the Axum application with all routes and middleware
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind server address")?;

    // Serve the application with graceful shutdown support
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Sets up a signal handler for graceful shutdown
///
/// Waits for either CTRL+C or SIGTERM (on Unix systems) and then triggers
/// the graceful shutdown process.
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
}
