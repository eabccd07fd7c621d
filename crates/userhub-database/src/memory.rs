//! In-process user directory for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_entity::user::{NewUser, User};

use crate::directory::UserDirectory;

/// User directory held in memory.
///
/// Email uniqueness is enforced case-insensitively under the write lock,
/// mirroring the `LOWER(email)` unique index of the relational schema.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the directory holds no users.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    async fn mutate<F>(&self, id: Uuid, active_only: bool, apply: F) -> AppResult<User>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) if !active_only || user.is_active => {
                apply(user);
                user.updated_at = Utc::now();
                Ok(user.clone())
            }
            _ => Err(AppError::not_found(format!("User {id} not found"))),
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.to_lowercase();
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<User> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        let email = data.email.to_lowercase();
        if users.values().any(|u| u.email.to_lowercase() == email) {
            return Err(AppError::conflict("Email already in use"));
        }
        let user = User::from_new(data);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn mark_email_verified(&self, id: Uuid) -> AppResult<User> {
        self.mutate(id, true, |user| user.email_verified = true).await
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<User> {
        let password_hash = password_hash.to_string();
        self.mutate(id, true, move |user| {
            user.password_hash = password_hash;
            user.login_attempts = 0;
        })
        .await
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<User> {
        self.mutate(id, false, |user| user.is_active = false).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
