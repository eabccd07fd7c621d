//! User administration handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::response::{Envelope, UserResponse, user_links};
use crate::error::ApiError;
use crate::extractors::parse_uuid;
use crate::state::AppState;

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<UserResponse>>, ApiError> {
    let id = parse_uuid(&id)?;
    let user = state.admin.get_user(id).await?;

    Ok(Json(Envelope::new(
        UserResponse::from(user),
        user_links(state.base_url(), id, "GET", "Get user"),
    )))
}

/// POST /users/{id}/deactivate
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<UserResponse>>, ApiError> {
    let id = parse_uuid(&id)?;
    let user = state.admin.deactivate_user(id).await?;

    Ok(Json(Envelope::new(
        UserResponse::from(user),
        user_links(state.base_url(), id, "POST", "Soft delete"),
    )))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_uuid(&id)?;
    state.admin.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
