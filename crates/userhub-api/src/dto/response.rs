//! Response DTOs and hypermedia links.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use userhub_entity::user::User;

/// A hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL.
    pub href: String,
    /// Relation of the target to the current resource.
    pub rel: String,
    /// HTTP method to use.
    pub method: String,
    /// Short description.
    pub title: String,
}

impl Link {
    fn new(href: String, rel: &str, method: &str, title: &str) -> Self {
        Self {
            href,
            rel: rel.to_string(),
            method: method.to_string(),
            title: title.to_string(),
        }
    }
}

/// Standard success body: `{ "_embedded": ..., "_links": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The resource itself.
    #[serde(rename = "_embedded")]
    pub embedded: T,
    /// Related actions keyed by name.
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
}

impl<T> Envelope<T> {
    /// Wraps `embedded` with the given links.
    pub fn new(embedded: T, links: BTreeMap<String, Link>) -> Self {
        Self { embedded, links }
    }
}

/// Links offered on every `/auth` response.
pub fn auth_links(base: &str, path: &str, method: &str, title: &str) -> BTreeMap<String, Link> {
    let base = base.trim_end_matches('/');
    let mut links = BTreeMap::new();
    links.insert(
        "self".to_string(),
        Link::new(format!("{base}{path}"), "self", method, title),
    );
    links.insert(
        "register".to_string(),
        Link::new(
            format!("{base}/auth/register"),
            "register_new_user",
            "POST",
            "Register a new user account",
        ),
    );
    links.insert(
        "verify_email".to_string(),
        Link::new(
            format!("{base}/auth/verify-email"),
            "verify_user_email",
            "GET",
            "Verify your email address",
        ),
    );
    links.insert(
        "resend_verification_email".to_string(),
        Link::new(
            format!("{base}/auth/resend-verification"),
            "resend_verification_email",
            "POST",
            "Resend the email verification link",
        ),
    );
    links.insert(
        "request_reset_password".to_string(),
        Link::new(
            format!("{base}/auth/request-password-reset"),
            "request_password_reset",
            "POST",
            "Send request for password reset",
        ),
    );
    links.insert(
        "reset_password".to_string(),
        Link::new(
            format!("{base}/auth/reset-password"),
            "reset_password",
            "POST",
            "Reset password",
        ),
    );
    links
}

/// Links offered on `/users/{id}` responses.
pub fn user_links(base: &str, id: Uuid, method: &str, title: &str) -> BTreeMap<String, Link> {
    let base = base.trim_end_matches('/');
    let mut links = BTreeMap::new();
    links.insert(
        "self".to_string(),
        Link::new(format!("{base}/users/{id}"), "self", method, title),
    );
    links.insert(
        "get_user".to_string(),
        Link::new(format!("{base}/users/{id}"), "get_user", "GET", "Get user"),
    );
    links.insert(
        "deactivate_user".to_string(),
        Link::new(
            format!("{base}/users/{id}/deactivate"),
            "deactivate_user",
            "POST",
            "Soft delete",
        ),
    );
    links.insert(
        "delete_user".to_string(),
        Link::new(
            format!("{base}/users/{id}"),
            "delete_user",
            "DELETE",
            "Delete user",
        ),
    );
    links
}

/// Registration result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedUserResponse {
    /// Registered email.
    pub user_email: String,
    /// New user id.
    pub user_id: Uuid,
}

/// A plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User representation without credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Role name.
    pub role: String,
    /// Whether the email has been verified.
    pub email_verified: bool,
    /// Whether the account is active.
    pub is_active: bool,
    /// Failed login counter.
    pub login_attempts: i32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Last login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role.to_string(),
            email_verified: user.email_verified,
            is_active: user.is_active,
            login_attempts: user.login_attempts,
            created_at: user.created_at,
            updated_at: user.updated_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// `connected` or `unavailable`.
    pub database: String,
    /// `connected` or `unavailable`.
    pub cache: String,
    /// Crate version.
    pub version: String,
}
