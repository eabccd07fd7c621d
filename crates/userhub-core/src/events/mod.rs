//! Domain events emitted by UserHub lifecycle operations.
//!
//! Events are published to the message broker and consumed by the mailer.
//! Topic names and payload shapes are a wire contract with those consumers.

pub mod user;

pub use user::{LifecycleEvent, ResetPasswordToken, WelcomeUser, topics};
