//! In-memory store implementations backed by `DashMap`.
//!
//! Used by unit tests and by deployments that do not need users or
//! revocations to survive a restart.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_entity::user::{NewUser, User};

use crate::repositories::{CredentialStore, RevokedTokenStore};

/// Credential store kept entirely in memory.
#[derive(Debug)]
pub struct MemoryCredentialStore {
    /// Users keyed by id.
    users: DashMap<i64, User>,
    /// Username to id index; the entry lock makes inserts unique.
    by_username: DashMap<String, i64>,
    next_id: AtomicI64,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            by_username: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn sorted(mut users: Vec<User>) -> Vec<User> {
        users.sort_by_key(|u| u.id);
        users
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let Some(id) = self.by_username.get(username).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        match self.by_username.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Username already exists")),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let user = user.into_user(id);
                self.users.insert(id, user.clone());
                slot.insert(id);
                Ok(user)
            }
        }
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut existing = self
            .users
            .get_mut(&user.id)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        // Usernames are immutable once assigned.
        let username = existing.username.clone();
        *existing = User {
            username,
            ..user.clone()
        };
        Ok(existing.clone())
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        Ok(Self::sorted(
            self.users.iter().map(|e| e.value().clone()).collect(),
        ))
    }

    async fn list_inactive(&self) -> AppResult<Vec<User>> {
        Ok(Self::sorted(
            self.users
                .iter()
                .filter(|e| !e.value().is_active)
                .map(|e| e.value().clone())
                .collect(),
        ))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        match self.users.remove(&id) {
            Some((_, user)) => {
                self.by_username.remove(&user.username);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Token blacklist kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryRevokedTokenStore {
    tokens: DashMap<String, DateTime<Utc>>,
}

impl MemoryRevokedTokenStore {
    /// Create an empty blacklist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the blacklist is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl RevokedTokenStore for MemoryRevokedTokenStore {
    async fn insert(&self, token: &str, expires_at: DateTime<Utc>) -> AppResult<()> {
        self.tokens.entry(token.to_string()).or_insert(expires_at);
        Ok(())
    }

    async fn exists(&self, token: &str) -> AppResult<bool> {
        Ok(self.tokens.contains_key(token))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let before = self.tokens.len();
        self.tokens.retain(|_, expires_at| *expires_at > now);
        Ok(before.saturating_sub(self.tokens.len()) as u64)
    }
}
