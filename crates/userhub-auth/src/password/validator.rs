//! Password policy enforcement for new passwords.

use userhub_core::error::AppError;

/// Symbols of which a password must contain at least one.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+";

const MIN_LENGTH: usize = 8;
const MAX_LENGTH: usize = 20;

/// Validates new passwords against the account password policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordValidator;

impl PasswordValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a password and its confirmation.
    ///
    /// The pair must match byte for byte before the policy itself is checked.
    pub fn validate_pair(&self, password: &str, confirmation: &str) -> Result<(), AppError> {
        if password != confirmation {
            return Err(AppError::invalid_parameter(
                "Both passwords must be the same",
            ));
        }
        self.validate(password)
    }

    /// Validates a password against all policy rules.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(AppError::invalid_parameter(format!(
                "Password must be between {MIN_LENGTH} and {MAX_LENGTH} characters long"
            )));
        }

        if password.chars().any(char::is_whitespace) {
            return Err(AppError::invalid_parameter(
                "Password must not contain whitespace",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(AppError::invalid_parameter(
                "Password must contain at least one uppercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(AppError::invalid_parameter(
                "Password must contain at least one lowercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::invalid_parameter(
                "Password must contain at least one digit",
            ));
        }

        if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
            return Err(AppError::invalid_parameter(format!(
                "Password must contain at least one of {PASSWORD_SYMBOLS}"
            )));
        }

        Ok(())
    }
}
