//! HTTP integration tests against the in-memory stack.

mod auth_test;
mod health_test;
mod helpers;
mod logging_test;
mod user_test;
