//! Convenience result type alias for UserHub.

use crate::error::AppError;

/// A specialized `Result` type for UserHub operations.
pub type AppResult<T> = Result<T, AppError>;
