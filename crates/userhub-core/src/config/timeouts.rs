//! Deadlines for calls to backing services.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-call deadlines applied by the lifecycle service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Deadline for a single database or cache call, in milliseconds.
    #[serde(default = "default_store_ms")]
    pub store_ms: u64,
    /// Deadline for a single event publish, in milliseconds.
    #[serde(default = "default_publish_ms")]
    pub publish_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            store_ms: default_store_ms(),
            publish_ms: default_publish_ms(),
        }
    }
}

impl TimeoutConfig {
    /// Store deadline as a [`Duration`].
    pub fn store(&self) -> Duration {
        Duration::from_millis(self.store_ms)
    }

    /// Publish deadline as a [`Duration`].
    pub fn publish(&self) -> Duration {
        Duration::from_millis(self.publish_ms)
    }
}

fn default_store_ms() -> u64 {
    5000
}

fn default_publish_ms() -> u64 {
    2000
}
