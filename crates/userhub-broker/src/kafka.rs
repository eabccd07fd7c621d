//! Kafka event publisher.

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use tracing::{debug, error, info};

use userhub_core::config::BrokerConfig;
use userhub_core::error::AppError;
use userhub_core::result::AppResult;

use crate::publisher::EventPublisher;

/// Publishes events through an rdkafka `FutureProducer`.
pub struct KafkaEventPublisher {
    /// Kafka producer.
    producer: FutureProducer,
    /// Upper bound on queueing plus delivery.
    timeout: Duration,
}

impl std::fmt::Debug for KafkaEventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaEventPublisher")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl KafkaEventPublisher {
    /// Create a producer from configuration.
    ///
    /// The producer connects lazily; broker reachability is only observed
    /// on the first send.
    pub fn new(config: &BrokerConfig) -> AppResult<Self> {
        info!(
            bootstrap_servers = %config.bootstrap_servers,
            client_id = %config.client_id,
            acks = %config.acks,
            "Creating Kafka producer"
        );

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.bootstrap_servers)
            .set("client.id", &config.client_id)
            .set("acks", &config.acks)
            .set("message.timeout.ms", config.message_timeout_ms.to_string())
            .create()
            .map_err(|e| AppError::configuration(format!("Failed to create Kafka producer: {e}")))?;

        Ok(Self {
            producer,
            timeout: Duration::from_millis(config.message_timeout_ms),
        })
    }
}

#[async_trait]
impl EventPublisher for KafkaEventPublisher {
    async fn publish(&self, topic: &str, key: &str, payload: Vec<u8>) -> AppResult<()> {
        let record = FutureRecord::to(topic).payload(&payload).key(key);

        match self.producer.send(record, Timeout::After(self.timeout)).await {
            Ok((partition, offset)) => {
                debug!(topic, partition, offset, "Event published");
                Ok(())
            }
            Err((kafka_error, _)) => {
                error!(topic, error = %kafka_error, "Failed to publish event");
                Err(AppError::service_unavailable(format!(
                    "Failed to publish to '{topic}': {kafka_error}"
                )))
            }
        }
    }

    async fn flush(&self) -> AppResult<()> {
        // librdkafka's flush blocks the calling thread until the queue drains.
        let producer = self.producer.clone();
        let timeout = self.timeout;
        tokio::task::spawn_blocking(move || producer.flush(Timeout::After(timeout)))
            .await
            .map_err(|e| AppError::internal(format!("Kafka flush task failed: {e}")))?
            .map_err(|e| AppError::service_unavailable(format!("Failed to flush Kafka producer: {e}")))
    }
}
