//! # userhub-service
//!
//! Business logic service layer for UserHub. The lifecycle service ties
//! the user directory, the reset token store and the event publisher
//! together into registration, email verification and password reset.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod deadline;
pub mod lifecycle;
pub mod user;

pub use lifecycle::{LifecycleService, LifecycleSettings, RegisterUser, ResendOutcome};
pub use user::UserAdminService;
