//! # userhub-api
//!
//! HTTP API layer for UserHub built on Axum.
//!
//! Provides the `/auth` lifecycle endpoints, `/users` administration,
//! the health check, middleware (CORS, request logging), extractors,
//! DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, shutdown_signal};
pub use state::AppState;
