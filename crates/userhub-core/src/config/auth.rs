//! Token configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Signed-token and reset-token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signed verification tokens. Required.
    #[serde(default)]
    pub secret: String,
    /// Context string bound into every signed token.
    #[serde(default = "default_salt")]
    pub salt: String,
    /// Lifetime of a password-reset token in the cache, in seconds.
    #[serde(default = "default_reset_ttl")]
    pub reset_token_ttl_seconds: u64,
    /// Maximum accepted age of an email-verification token, in seconds.
    #[serde(default = "default_verification_max_age")]
    pub verification_max_age_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            salt: default_salt(),
            reset_token_ttl_seconds: default_reset_ttl(),
            verification_max_age_seconds: default_verification_max_age(),
        }
    }
}

impl AuthConfig {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.secret must be set (USERHUB__AUTH__SECRET)",
            ));
        }
        if self.salt.is_empty() {
            return Err(AppError::configuration("auth.salt must not be empty"));
        }
        if self.reset_token_ttl_seconds == 0 || self.verification_max_age_seconds == 0 {
            return Err(AppError::configuration(
                "auth token lifetimes must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn default_salt() -> String {
    "Email_Verification_&_Forgot_password".to_string()
}

fn default_reset_ttl() -> u64 {
    900
}

fn default_verification_max_age() -> u64 {
    1800
}
