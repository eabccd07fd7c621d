//! Route definitions for the UserHub HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes bound to `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .route("/health", get(handlers::health::health))
        .with_state(state)
}

/// Registration, verification and password reset
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/verify-email", get(handlers::auth::verify_email))
        .route(
            "/auth/resend-verification",
            post(handlers::auth::resend_verification),
        )
        .route(
            "/auth/request-password-reset",
            post(handlers::auth::request_password_reset),
        )
        .route("/auth/reset-password", post(handlers::auth::reset_password))
}

/// User administration
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{id}",
            get(handlers::user::get_user).delete(handlers::user::delete_user),
        )
        .route(
            "/users/{id}/deactivate",
            post(handlers::user::deactivate_user),
        )
}
