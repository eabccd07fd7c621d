//! Request DTOs with validation.

use std::fmt;

use serde::Deserialize;
use validator::Validate;

use userhub_service::RegisterUser;

/// Registration request body.
#[derive(Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "Full name must be 1 to 255 characters"))]
    pub full_name: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub password2: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
            password2: req.password2,
        }
    }
}

/// Body naming a user by email.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmailRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Password reset confirmation body.
#[derive(Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Reset token from the email.
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    /// New password.
    pub password: String,
    /// New password confirmation.
    pub password2: String,
}

impl fmt::Debug for ResetPasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetPasswordRequest").finish_non_exhaustive()
    }
}

/// Query string of the verification link.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailQuery {
    /// Signed verification token.
    #[serde(default)]
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}
