//! Signed, time-limited tokens.

pub mod claims;
pub mod codec;

pub use claims::{SignedClaims, VerificationPayload};
pub use codec::SignedTokenCodec;
