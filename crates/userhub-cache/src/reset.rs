//! Single-use password reset tokens.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;
use userhub_core::traits::cache::CacheProvider;

use crate::keys;
use crate::provider::CacheManager;

/// Value stored under a reset token key.
#[derive(Debug, Serialize, Deserialize)]
struct ResetEntry {
    id: Uuid,
}

/// Transient store of reset tokens, keyed by token, valued by user id.
///
/// Every backend failure surfaces as `ServiceUnavailable`.
#[derive(Debug, Clone)]
pub struct ResetTokenStore {
    cache: CacheManager,
}

impl ResetTokenStore {
    /// Create a store on top of the given cache.
    pub fn new(cache: CacheManager) -> Self {
        Self { cache }
    }

    /// Store `token` for `user_id`, expiring after `ttl`.
    pub async fn put(&self, token: &str, user_id: Uuid, ttl: Duration) -> AppResult<()> {
        let value = serde_json::to_string(&ResetEntry { id: user_id })?;
        self.cache
            .set(&keys::reset_token(token), &value, ttl)
            .await
            .map_err(unavailable)?;
        debug!(user_id = %user_id, ttl_seconds = ttl.as_secs(), "Stored reset token");
        Ok(())
    }

    /// Look up the owner of `token` without consuming it.
    pub async fn get(&self, token: &str) -> AppResult<Option<Uuid>> {
        let raw = self
            .cache
            .get(&keys::reset_token(token))
            .await
            .map_err(unavailable)?;
        raw.map(|value| decode(&value)).transpose()
    }

    /// Atomically read and remove `token`.
    ///
    /// Of any number of concurrent callers, at most one receives the owner.
    pub async fn take(&self, token: &str) -> AppResult<Option<Uuid>> {
        let raw = self
            .cache
            .take(&keys::reset_token(token))
            .await
            .map_err(unavailable)?;
        raw.map(|value| decode(&value)).transpose()
    }

    /// Remove `token` if present.
    pub async fn delete(&self, token: &str) -> AppResult<()> {
        self.cache
            .delete(&keys::reset_token(token))
            .await
            .map_err(unavailable)
    }
}

fn decode(value: &str) -> AppResult<Uuid> {
    let entry: ResetEntry = serde_json::from_str(value).map_err(|e| {
        AppError::with_source(ErrorKind::Serialization, "Corrupt reset token entry", e)
    })?;
    Ok(entry.id)
}

fn unavailable(err: AppError) -> AppError {
    if err.kind == ErrorKind::ServiceUnavailable {
        return err;
    }
    let message = format!("Reset token store unavailable: {}", err.message);
    match err.source {
        Some(source) => AppError {
            kind: ErrorKind::ServiceUnavailable,
            message,
            source: Some(source),
        },
        None => AppError::service_unavailable(message),
    }
}
