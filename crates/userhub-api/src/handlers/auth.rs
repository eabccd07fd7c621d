//! Auth handlers: register, verify email, resend verification, password reset.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use validator::Validate;

use userhub_core::error::AppError;
use userhub_service::ResendOutcome;

use crate::dto::request::{EmailRequest, RegisterRequest, ResetPasswordRequest, VerifyEmailQuery};
use crate::dto::response::{CreatedUserResponse, Envelope, MessageResponse, auth_links};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

type Message = Json<Envelope<MessageResponse>>;

fn message(state: &AppState, path: &str, method: &str, title: &str, text: impl Into<String>) -> Message {
    Json(Envelope::new(
        MessageResponse::new(text),
        auth_links(state.base_url(), path, method, title),
    ))
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<CreatedUserResponse>>), ApiError> {
    let user = state.lifecycle.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(
            CreatedUserResponse {
                user_email: user.email,
                user_id: user.id,
            },
            auth_links(state.base_url(), "/auth/register", "POST", "Register new user"),
        )),
    ))
}

/// GET /auth/verify-email?token=...
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<Message, ApiError> {
    query
        .validate()
        .map_err(|e| AppError::invalid_parameter(e.to_string()))?;

    let user = state.lifecycle.verify_email(&query.token).await?;

    Ok(message(
        &state,
        "/auth/verify-email",
        "GET",
        "Verify email",
        format!("The user {} was verified", user.id),
    ))
}

/// POST /auth/resend-verification
pub async fn resend_verification(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<EmailRequest>,
) -> Result<(StatusCode, Message), ApiError> {
    let text = match state.lifecycle.resend_verification(&req.email).await? {
        ResendOutcome::Sent => {
            "A verification email has been sent. Please check your inbox or spam folder."
        }
        ResendOutcome::AlreadyVerified => "This email has already been verified. Please log in.",
    };

    Ok((
        StatusCode::ACCEPTED,
        message(
            &state,
            "/auth/resend-verification",
            "POST",
            "Resend verification email",
            text,
        ),
    ))
}

/// POST /auth/request-password-reset
pub async fn request_password_reset(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<EmailRequest>,
) -> Result<(StatusCode, Message), ApiError> {
    state.lifecycle.request_password_reset(&req.email).await?;

    Ok((
        StatusCode::ACCEPTED,
        message(
            &state,
            "/auth/request-password-reset",
            "POST",
            "Request password reset",
            "A reset password email has been sent. Please check your inbox or spam folder.",
        ),
    ))
}

/// POST /auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> Result<Message, ApiError> {
    state
        .lifecycle
        .confirm_password_reset(&req.token, &req.password, &req.password2)
        .await?;

    Ok(message(
        &state,
        "/auth/reset-password",
        "POST",
        "Reset password",
        "The password has been updated successfully. Please log in.",
    ))
}
