//! Cache key builders for all UserHub cache entries.
//!
//! The configured key prefix is applied by the provider, not here.

/// Namespace for password reset tokens.
pub const RESET_TOKEN_PREFIX: &str = "password-reset-token:";

/// Cache key for a password reset token.
pub fn reset_token(token: &str) -> String {
    format!("{RESET_TOKEN_PREFIX}{token}")
}
