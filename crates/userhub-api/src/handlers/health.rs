//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use userhub_core::traits::cache::CacheProvider;
use userhub_database::UserDirectory;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

fn label(up: bool) -> String {
    if up { "connected" } else { "unavailable" }.to_string()
}

/// GET /health
///
/// Returns 503 when either backing store is unreachable.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let timeout = state.config.timeouts.store();

    let (database, cache) = tokio::join!(
        tokio::time::timeout(timeout, state.directory.health_check()),
        tokio::time::timeout(timeout, state.cache.health_check()),
    );
    let database = matches!(database, Ok(Ok(true)));
    let cache = matches!(cache, Ok(Ok(true)));

    let (status, label_text) = if database && cache {
        (StatusCode::OK, "ok")
    } else {
        warn!(database, cache, "Health check degraded");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label_text.to_string(),
            database: label(database),
            cache: label(cache),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
