//! Bounded waits on backing services.

use std::future::Future;
use std::time::Duration;

use userhub_core::error::AppError;
use userhub_core::result::AppResult;

/// Await `fut`, failing with `ServiceUnavailable` once `limit` elapses.
///
/// The wrapped operation is dropped on timeout; whatever it already
/// applied on the remote side stays applied.
pub async fn within<T, F>(limit: Duration, operation: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::service_unavailable(format!(
            "{operation} timed out after {}ms",
            limit.as_millis()
        ))),
    }
}
