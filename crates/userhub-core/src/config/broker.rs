//! Event broker configuration.

use serde::{Deserialize, Serialize};

/// Kafka producer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Broker provider type: `"kafka"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Comma-separated `host:port` list.
    #[serde(default = "default_bootstrap_servers")]
    pub bootstrap_servers: String,
    /// Client id reported to the brokers.
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Producer acknowledgement level (`0`, `1` or `all`).
    #[serde(default = "default_acks")]
    pub acks: String,
    /// Upper bound on local queueing plus delivery, in milliseconds.
    #[serde(default = "default_message_timeout")]
    pub message_timeout_ms: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            bootstrap_servers: default_bootstrap_servers(),
            client_id: default_client_id(),
            acks: default_acks(),
            message_timeout_ms: default_message_timeout(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_bootstrap_servers() -> String {
    "localhost:9092".to_string()
}

fn default_client_id() -> String {
    "userhub".to_string()
}

fn default_acks() -> String {
    "all".to_string()
}

fn default_message_timeout() -> u64 {
    5000
}
