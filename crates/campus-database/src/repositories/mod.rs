//! Store traits consumed by the auth core, plus their SQL implementations.
//!
//! The auth crate only ever talks to `dyn CredentialStore` and
//! `dyn RevokedTokenStore`; single-row atomicity is the store's job.

pub mod revoked_token;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use campus_core::result::AppResult;
use campus_entity::user::{NewUser, User};

pub use revoked_token::RevokedTokenRepository;
pub use user::UserRepository;

/// Lookup and persistence of user accounts.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by login name.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with `Conflict` when the username is taken.
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// Persist every mutable field of an existing user.
    async fn update(&self, user: &User) -> AppResult<User>;

    /// All users, ordered by id.
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// Users still awaiting activation, ordered by id.
    async fn list_inactive(&self) -> AppResult<Vec<User>>;

    /// Delete a user. Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// The token blacklist.
#[async_trait]
pub trait RevokedTokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Record a revoked token. Recording the same token twice is not an error.
    async fn insert(&self, token: &str, expires_at: DateTime<Utc>) -> AppResult<()>;

    /// Whether the token has been revoked.
    async fn exists(&self, token: &str) -> AppResult<bool>;

    /// Drop records whose token expired at or before `now`.
    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
