//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use userhub_cache::CacheManager;
use userhub_core::config::AppConfig;
use userhub_database::UserDirectory;
use userhub_service::{LifecycleService, UserAdminService};

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Registration, verification and password reset.
    pub lifecycle: LifecycleService,
    /// Admin user management.
    pub admin: UserAdminService,
    /// User records, for health checks.
    pub directory: Arc<dyn UserDirectory>,
    /// Cache, for health checks.
    pub cache: CacheManager,
}

impl AppState {
    /// Base URL used in response links.
    pub fn base_url(&self) -> &str {
        &self.config.server.public_base_url
    }
}
