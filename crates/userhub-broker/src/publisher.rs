//! Event publisher trait and provider selection.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use userhub_core::config::BrokerConfig;
use userhub_core::error::AppError;
use userhub_core::events::LifecycleEvent;
use userhub_core::result::AppResult;

/// Trait for message broker backends.
///
/// Failures to enqueue or deliver are reported as `ServiceUnavailable`
/// and are never swallowed.
#[async_trait]
pub trait EventPublisher: Send + Sync + std::fmt::Debug + 'static {
    /// Publish raw bytes to `topic` under `key`.
    async fn publish(&self, topic: &str, key: &str, payload: Vec<u8>) -> AppResult<()>;

    /// Publish a lifecycle event to its topic.
    async fn publish_event(&self, event: &LifecycleEvent) -> AppResult<()> {
        let payload = event.payload()?;
        self.publish(event.topic(), &event.key(), payload).await
    }

    /// Wait for in-flight messages to be delivered. Called on shutdown.
    async fn flush(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Build the publisher selected by configuration.
pub fn build_publisher(config: &BrokerConfig) -> AppResult<Arc<dyn EventPublisher>> {
    match config.provider.as_str() {
        #[cfg(feature = "kafka")]
        "kafka" => {
            info!("Initializing Kafka event publisher");
            Ok(Arc::new(crate::kafka::KafkaEventPublisher::new(config)?))
        }
        "memory" => {
            info!("Initializing in-memory event publisher");
            Ok(Arc::new(crate::memory::MemoryEventPublisher::new()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown broker provider: '{other}'. Supported: kafka, memory"
        ))),
    }
}
