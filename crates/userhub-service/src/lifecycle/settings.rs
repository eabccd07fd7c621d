//! Tunables for the lifecycle service.

use std::time::Duration;

use userhub_core::config::{AppConfig, TimeoutConfig};

/// Lifetimes, deadlines and link base used by [`super::LifecycleService`].
#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    /// How long a reset token stays redeemable.
    pub reset_token_ttl: Duration,
    /// Maximum accepted age of a verification token, in seconds.
    pub verification_max_age_seconds: u64,
    /// Per-call deadlines.
    pub timeouts: TimeoutConfig,
    /// Base URL for links handed to the mailer.
    pub public_base_url: String,
}

impl LifecycleSettings {
    /// Derive settings from the application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            reset_token_ttl: Duration::from_secs(config.auth.reset_token_ttl_seconds),
            verification_max_age_seconds: config.auth.verification_max_age_seconds,
            timeouts: config.timeouts,
            public_base_url: config.server.public_base_url.clone(),
        }
    }
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            reset_token_ttl: Duration::from_secs(900),
            verification_max_age_seconds: 1800,
            timeouts: TimeoutConfig::default(),
            public_base_url: "http://localhost:8000".to_string(),
        }
    }
}
