//! Durable store of user records.

use async_trait::async_trait;
use uuid::Uuid;

use userhub_core::result::AppResult;
use userhub_entity::user::{NewUser, User};

/// Storage-agnostic access to user records.
///
/// Every mutation refreshes `updated_at` as part of the same write.
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by id. `NotFound` if absent.
    async fn find_by_id(&self, id: Uuid) -> AppResult<User>;

    /// Insert a new user. `Conflict` if the email is already taken.
    async fn create(&self, data: NewUser) -> AppResult<User>;

    /// Set `email_verified`. `NotFound` unless an active row matches.
    async fn mark_email_verified(&self, id: Uuid) -> AppResult<User>;

    /// Replace the password hash and clear `login_attempts`.
    /// `NotFound` unless an active row matches.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<User>;

    /// Clear `is_active`, keeping the row. `NotFound` if absent.
    async fn soft_delete(&self, id: Uuid) -> AppResult<User>;

    /// Remove the row. `NotFound` if absent.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
