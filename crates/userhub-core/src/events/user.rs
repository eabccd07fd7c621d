//! User lifecycle events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::AppResult;

/// Topic names.
pub mod topics {
    /// A user registered.
    pub const USER_CREATED: &str = "user.created";
    /// A fresh verification email was requested.
    pub const VERIFICATION_TOKEN_CREATED: &str = "user.verification_token.created";
    /// A password reset token was issued.
    pub const RESET_REQUESTED: &str = "user.reset_requested";
    /// A password was changed through a reset token.
    pub const PASSWORD_RESET: &str = "user.password_reset";
}

/// Payload sent when the mailer should greet or re-verify a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeUser {
    /// The user's email address.
    pub user: String,
    /// The user ID.
    pub id: Uuid,
    /// The user's display name.
    pub full_name: String,
}

/// Payload carrying a freshly issued reset token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordToken {
    /// The single-use reset token.
    pub token: String,
    /// The user's email address.
    pub user: String,
}

/// Union of all lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Emitted after a successful registration.
    UserCreated(WelcomeUser),
    /// Emitted when an unverified user asks for another verification email.
    VerificationTokenCreated(WelcomeUser),
    /// Emitted after a reset token was stored.
    ResetRequested {
        /// The owning user, used as the message key.
        user_id: Uuid,
        /// The payload.
        payload: ResetPasswordToken,
    },
    /// Emitted after a password was replaced. The payload is the bare email.
    PasswordReset {
        /// The user's email address.
        email: String,
    },
}

impl LifecycleEvent {
    /// Topic this event is published to.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::UserCreated(_) => topics::USER_CREATED,
            Self::VerificationTokenCreated(_) => topics::VERIFICATION_TOKEN_CREATED,
            Self::ResetRequested { .. } => topics::RESET_REQUESTED,
            Self::PasswordReset { .. } => topics::PASSWORD_RESET,
        }
    }

    /// Partition key, so all events of one user land on one partition.
    pub fn key(&self) -> String {
        match self {
            Self::UserCreated(p) | Self::VerificationTokenCreated(p) => p.id.to_string(),
            Self::ResetRequested { user_id, .. } => user_id.to_string(),
            Self::PasswordReset { email } => email.clone(),
        }
    }

    /// JSON-encoded payload bytes.
    pub fn payload(&self) -> AppResult<Vec<u8>> {
        let bytes = match self {
            Self::UserCreated(p) | Self::VerificationTokenCreated(p) => serde_json::to_vec(p)?,
            Self::ResetRequested { payload, .. } => serde_json::to_vec(payload)?,
            Self::PasswordReset { email } => serde_json::to_vec(email)?,
        };
        Ok(bytes)
    }
}
