//! Token blacklist repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use campus_core::error::{AppError, ErrorKind};
use campus_core::result::AppResult;

use super::RevokedTokenStore;

/// Repository over the `token_blacklist` table.
#[derive(Debug, Clone)]
pub struct RevokedTokenRepository {
    pool: SqlitePool,
}

impl RevokedTokenRepository {
    /// Create a new revoked-token repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevokedTokenStore for RevokedTokenRepository {
    async fn insert(&self, token: &str, expires_at: DateTime<Utc>) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO token_blacklist (token, expires_at) VALUES (?1, ?2) \
             ON CONFLICT (token) DO NOTHING",
        )
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke token", e))?;

        if result.rows_affected() == 0 {
            debug!("Token was already revoked");
        }
        Ok(())
    }

    async fn exists(&self, token: &str) -> AppResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM token_blacklist WHERE token = ?1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to check token blacklist", e)
                })?;
        Ok(found.is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM token_blacklist WHERE expires_at <= ?1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge token blacklist", e)
            })?;
        Ok(result.rows_affected())
    }
}
