//! # campus-database
//!
//! SQLite connection management, the credential and revocation store
//! traits consumed by the auth core, and their SQL and in-memory
//! implementations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{CredentialStore, RevokedTokenStore};
