//! HS256 signing and age-checked verification of tokens.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use userhub_core::config::AuthConfig;
use userhub_core::error::AppError;

use super::claims::SignedClaims;

/// Issues and verifies tamper-evident, time-limited tokens.
///
/// Tokens are compact JWS strings (URL-safe base64 segments joined by
/// dots), so they can be placed in a query string unescaped.
#[derive(Clone)]
pub struct SignedTokenCodec {
    /// HMAC key for signing.
    encoding_key: EncodingKey,
    /// HMAC key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Context bound into each token as the audience.
    salt: String,
}

impl std::fmt::Debug for SignedTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedTokenCodec")
            .field("salt", &self.salt)
            .finish()
    }
}

impl SignedTokenCodec {
    /// Creates a codec from a secret and a salt.
    ///
    /// Fails with a configuration error when the secret is empty.
    pub fn new(secret: &str, salt: &str) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::configuration(
                "Signed token secret must not be empty",
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["aud"]);
        validation.set_audience(&[salt]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            salt: salt.to_string(),
        })
    }

    /// Creates a codec from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        Self::new(&config.secret, &config.salt)
    }

    /// Signs `payload` with the current time as its issuance time.
    pub fn issue<T: Serialize>(&self, payload: &T) -> Result<String, AppError> {
        self.issue_at(payload, Utc::now())
    }

    /// Signs `payload` with an explicit issuance time.
    pub fn issue_at<T: Serialize>(
        &self,
        payload: &T,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = SignedClaims {
            data: payload,
            iat: issued_at.timestamp(),
            aud: self.salt.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode signed token: {e}")))
    }

    /// Verifies a token and returns its payload.
    ///
    /// Checks, in order:
    /// 1. Encoding, signature and audience
    /// 2. Age since issuance is at most `max_age_seconds`
    pub fn verify<T: DeserializeOwned>(
        &self,
        token: &str,
        max_age_seconds: u64,
    ) -> Result<T, AppError> {
        self.verify_at(token, max_age_seconds, Utc::now())
    }

    /// Verifies a token against an explicit current time.
    pub fn verify_at<T: DeserializeOwned>(
        &self,
        token: &str,
        max_age_seconds: u64,
        now: DateTime<Utc>,
    ) -> Result<T, AppError> {
        let token_data = decode::<SignedClaims<T>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::token_invalid("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    AppError::token_invalid("Token was not issued for this purpose")
                }
                _ => AppError::token_invalid(format!("Malformed token: {e}")),
            })?;

        let claims = token_data.claims;
        let max_age = i64::try_from(max_age_seconds).unwrap_or(i64::MAX);
        let age = claims.age_seconds(now);
        if age > max_age {
            debug!(age_seconds = age, max_age_seconds, "Signed token past its maximum age");
            return Err(AppError::token_expired("Token has expired"));
        }

        Ok(claims.data)
    }
}
