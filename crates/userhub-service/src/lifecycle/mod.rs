//! User lifecycle: registration, verification, and password reset.

pub mod service;
pub mod settings;

pub use service::{LifecycleService, RegisterUser, ResendOutcome};
pub use settings::LifecycleSettings;
