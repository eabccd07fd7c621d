//! # userhub-core
//!
//! Core crate for UserHub. Contains the configuration schemas, the
//! lifecycle domain events and their topic names, the cache provider
//! trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other UserHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
