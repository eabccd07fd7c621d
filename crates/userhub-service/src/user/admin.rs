//! Admin user management: lookup, deactivation, removal.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use userhub_core::config::TimeoutConfig;
use userhub_core::result::AppResult;
use userhub_database::UserDirectory;
use userhub_entity::user::User;

use crate::deadline::within;

/// Handles administrative user operations.
#[derive(Debug, Clone)]
pub struct UserAdminService {
    /// User records.
    directory: Arc<dyn UserDirectory>,
    /// Per-call deadlines.
    timeouts: TimeoutConfig,
}

impl UserAdminService {
    /// Creates a new admin user service.
    pub fn new(directory: Arc<dyn UserDirectory>, timeouts: TimeoutConfig) -> Self {
        Self {
            directory,
            timeouts,
        }
    }

    /// Gets a user by id, active or not.
    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        within(
            self.timeouts.store(),
            "user lookup",
            self.directory.find_by_id(id),
        )
        .await
    }

    /// Marks a user inactive, keeping the record.
    pub async fn deactivate_user(&self, id: Uuid) -> AppResult<User> {
        let user = within(
            self.timeouts.store(),
            "user deactivation",
            self.directory.soft_delete(id),
        )
        .await?;

        info!(user_id = %id, "User deactivated");
        Ok(user)
    }

    /// Permanently removes a user.
    pub async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        within(
            self.timeouts.store(),
            "user deletion",
            self.directory.delete(id),
        )
        .await?;

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
