//! # userhub-database
//!
//! PostgreSQL connection management and the [`UserDirectory`] abstraction
//! over durable user records, with a PostgreSQL and an in-memory
//! implementation.

pub mod connection;
pub mod directory;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use directory::UserDirectory;
pub use memory::MemoryUserDirectory;
pub use repositories::PgUserDirectory;
