//! # userhub-broker
//!
//! Publication of lifecycle events to named topics. Two implementations:
//!
//! - **kafka**: [rdkafka](https://crates.io/crates/rdkafka) `FutureProducer`
//! - **memory**: records every published event, for tests and local runs
//!
//! Publishing is at-least-once and fire-and-forget: a call returns once the
//! broker accepted the record.

#[cfg(feature = "kafka")]
pub mod kafka;
pub mod memory;
pub mod publisher;

#[cfg(feature = "kafka")]
pub use kafka::KafkaEventPublisher;
pub use memory::{MemoryEventPublisher, PublishedEvent};
pub use publisher::{EventPublisher, build_publisher};
