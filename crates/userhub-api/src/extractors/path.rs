//! Typed path parameter helpers.

use uuid::Uuid;

use userhub_core::error::AppError;

/// Parses a UUID from a path segment.
pub fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::invalid_parameter(format!("Invalid user id: {s}")))
}
