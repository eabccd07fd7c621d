//! Database configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Database connection pool configuration.
///
/// Either `url` is given, or one is assembled from the individual parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full PostgreSQL connection URL.
    #[serde(default)]
    pub url: Option<String>,
    /// URL scheme used when assembling from parts.
    #[serde(default = "default_driver")]
    pub driver: String,
    /// Database host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Database port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Database user.
    #[serde(default)]
    pub user: String,
    /// Database password.
    #[serde(default)]
    pub password: String,
    /// Database name.
    #[serde(default)]
    pub name: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            driver: default_driver(),
            host: default_host(),
            port: default_port(),
            user: String::new(),
            password: String::new(),
            name: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Resolve the connection URL.
    pub fn connection_url(&self) -> String {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return url.to_string();
        }
        format!(
            "{}://{}:{}@{}:{}/{}",
            self.driver, self.user, self.password, self.host, self.port, self.name
        )
    }

    pub(crate) fn validate(&self) -> Result<(), AppError> {
        let has_url = self.url.as_deref().is_some_and(|u| !u.is_empty());
        if !has_url && self.name.is_empty() {
            return Err(AppError::configuration(
                "database.url or database.name must be set",
            ));
        }
        if self.max_connections == 0 || self.min_connections > self.max_connections {
            return Err(AppError::configuration(
                "database pool sizes are inconsistent",
            ));
        }
        Ok(())
    }
}

fn default_driver() -> String {
    "postgres".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}
