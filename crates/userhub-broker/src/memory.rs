//! In-memory event publisher.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use userhub_core::error::AppError;
use userhub_core::result::AppResult;

use crate::publisher::EventPublisher;

/// A record accepted by [`MemoryEventPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedEvent {
    /// Destination topic.
    pub topic: String,
    /// Partition key.
    pub key: String,
    /// Raw payload.
    pub payload: Vec<u8>,
}

impl PublishedEvent {
    /// Decode the payload as JSON.
    pub fn json(&self) -> AppResult<serde_json::Value> {
        Ok(serde_json::from_slice(&self.payload)?)
    }
}

/// Publisher that keeps every event in memory.
///
/// Can be switched into an unavailable state in which every publish fails.
#[derive(Debug, Default)]
pub struct MemoryEventPublisher {
    events: Mutex<Vec<PublishedEvent>>,
    unavailable: AtomicBool,
}

impl MemoryEventPublisher {
    /// Create an empty publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent publishes fail (`true`) or succeed (`false`).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of all accepted events, oldest first.
    pub async fn events(&self) -> Vec<PublishedEvent> {
        self.events.lock().await.clone()
    }

    /// Accepted events on one topic, oldest first.
    pub async fn events_on(&self, topic: &str) -> Vec<PublishedEvent> {
        self.events
            .lock()
            .await
            .iter()
            .filter(|e| e.topic == topic)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventPublisher for MemoryEventPublisher {
    async fn publish(&self, topic: &str, key: &str, payload: Vec<u8>) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::service_unavailable(format!(
                "Broker unavailable, could not publish to '{topic}'"
            )));
        }

        debug!(topic, "Event recorded");
        self.events.lock().await.push(PublishedEvent {
            topic: topic.to_string(),
            key: key.to_string(),
            payload,
        });
        Ok(())
    }
}
