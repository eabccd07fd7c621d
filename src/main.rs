//! UserHub Server: user registration, verification and password reset.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use userhub_api::{AppState, build_app, shutdown_signal};
use userhub_auth::SignedTokenCodec;
use userhub_broker::build_publisher;
use userhub_cache::{CacheManager, ResetTokenStore};
use userhub_core::config::AppConfig;
use userhub_core::error::AppError;
use userhub_database::{DatabasePool, PgUserDirectory, UserDirectory};
use userhub_service::{LifecycleService, LifecycleSettings, UserAdminService};

#[tokio::main]
async fn main() {
    let env = std::env::var("USERHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
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
    tracing::info!("Starting UserHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    userhub_database::migration::run_migrations(db_pool.pool()).await?;
    tracing::info!("Database migrations complete");

    let directory: Arc<dyn UserDirectory> =
        Arc::new(PgUserDirectory::new(db_pool.pool().clone()));

    // ── Step 2: Cache and reset tokens ───────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing cache");
    let cache = CacheManager::new(&config.cache).await?;
    let reset_tokens = ResetTokenStore::new(cache.clone());

    // ── Step 3: Event publisher ──────────────────────────────────
    let publisher = build_publisher(&config.broker)?;

    // ── Step 4: Services ─────────────────────────────────────────
    let codec = SignedTokenCodec::from_config(&config.auth)?;
    let lifecycle = LifecycleService::new(
        Arc::clone(&directory),
        reset_tokens,
        Arc::clone(&publisher),
        codec,
        LifecycleSettings::from_config(&config),
    );
    let admin = UserAdminService::new(Arc::clone(&directory), config.timeouts);

    // ── Step 5: Build and start HTTP server ──────────────────────
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = AppState {
        config: Arc::new(config),
        lifecycle,
        admin,
        directory,
        cache,
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(address = %addr, "UserHub server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 6: Release clients ──────────────────────────────────
    tracing::info!("Flushing event publisher");
    match tokio::time::timeout(grace, publisher.flush()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "Event publisher flush failed"),
        Err(_) => tracing::warn!("Event publisher flush timed out"),
    }

    db_pool.close().await;
    tracing::info!("UserHub server stopped");

    Ok(())
}
