//! # userhub-auth
//!
//! Credential primitives for the UserHub lifecycle.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and policy enforcement
//! - `token`: time-limited signed tokens for email verification links

pub mod password;
pub mod token;

pub use password::{PasswordHasher, PasswordValidator};
pub use token::{SignedTokenCodec, VerificationPayload};
