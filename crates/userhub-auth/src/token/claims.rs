//! Claims carried inside a signed token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims wrapping an arbitrary payload.
///
/// No `exp` claim is carried; the verifier bounds the age from `iat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedClaims<T> {
    /// The embedded payload.
    pub data: T,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Audience, bound to the configured salt.
    pub aud: String,
}

impl<T> SignedClaims<T> {
    /// Seconds elapsed between issuance and `now`. Negative if issued in the future.
    pub fn age_seconds(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp() - self.iat
    }
}

/// Payload of an email-verification token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationPayload {
    /// The user ID.
    pub id: Uuid,
    /// The email address the token was issued for.
    pub user: String,
}
