//! Token lifecycle: issuance, verification and revocation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use campus_core::config::AuthConfig;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_database::RevokedTokenStore;

use super::claims::Claims;
use super::codec::TokenCodec;

/// A freshly issued access + refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Issues, verifies and revokes tokens.
///
/// A token is valid only while it is unrevoked, correctly signed, carries
/// an `exp` claim, and that expiry has not passed.
#[derive(Debug, Clone)]
pub struct TokenManager {
    codec: TokenCodec,
    revoked: Arc<dyn RevokedTokenStore>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenManager {
    /// Create a manager with explicit lifetimes.
    pub fn new(
        codec: TokenCodec,
        revoked: Arc<dyn RevokedTokenStore>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            codec,
            revoked,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Create a manager from auth configuration.
    ///
    /// Lifetimes must be positive and small enough that an expiry can be
    /// computed from the current time.
    pub fn from_config(
        config: &AuthConfig,
        revoked: Arc<dyn RevokedTokenStore>,
    ) -> AppResult<Self> {
        let access_ttl = configured_ttl(
            "access_token_ttl_minutes",
            config.access_token_ttl_minutes,
            Duration::try_minutes,
        )?;
        let refresh_ttl = configured_ttl(
            "refresh_token_ttl_days",
            config.refresh_token_ttl_days,
            Duration::try_days,
        )?;

        Ok(Self::new(
            TokenCodec::from_config(config)?,
            revoked,
            access_ttl,
            refresh_ttl,
        ))
    }

    /// Default access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Default refresh token lifetime.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issue an access token with the default lifetime.
    pub fn issue_access(&self, subject: &str) -> AppResult<String> {
        self.issue_access_with_ttl(subject, self.access_ttl)
    }

    /// Issue an access token with an explicit lifetime.
    pub fn issue_access_with_ttl(&self, subject: &str, ttl: Duration) -> AppResult<String> {
        self.issue(subject, expires_after(Utc::now(), ttl)?)
    }

    /// Issue a refresh token with the default lifetime.
    pub fn issue_refresh(&self, subject: &str) -> AppResult<String> {
        self.issue_refresh_with_ttl(subject, self.refresh_ttl)
    }

    /// Issue a refresh token with an explicit lifetime.
    pub fn issue_refresh_with_ttl(&self, subject: &str, ttl: Duration) -> AppResult<String> {
        self.issue(subject, expires_after(Utc::now(), ttl)?)
    }

    /// Issue an access token and a refresh token for `subject`.
    pub fn issue_pair(&self, subject: &str) -> AppResult<TokenPair> {
        let now = Utc::now();
        let access_expires_at = expires_after(now, self.access_ttl)?;
        let refresh_expires_at = expires_after(now, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token: self.issue(subject, access_expires_at)?,
            refresh_token: self.issue(subject, refresh_expires_at)?,
            access_expires_at,
            refresh_expires_at,
        })
    }

    fn issue(&self, subject: &str, expires_at: DateTime<Utc>) -> AppResult<String> {
        self.codec
            .encode(&Claims::new(subject, expires_at))
            .map_err(|e| AppError::internal(e.to_string()))
    }

    /// Verify `token` and return its subject.
    ///
    /// Returns `Ok(None)` for revoked, badly signed, malformed, exp-less
    /// and expired tokens alike. Only store failures are errors.
    pub async fn verify(&self, token: &str) -> AppResult<Option<String>> {
        if self.revoked.exists(token).await? {
            debug!("Rejected revoked token");
            return Ok(None);
        }

        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Rejected undecodable token");
                return Ok(None);
            }
        };

        let Some(exp) = claims.exp else {
            debug!("Rejected token without exp claim");
            return Ok(None);
        };

        match DateTime::from_timestamp(exp, 0) {
            Some(expires_at) if expires_at >= Utc::now() => Ok(Some(claims.sub)),
            _ => {
                debug!("Rejected expired token");
                Ok(None)
            }
        }
    }

    /// Revoke `token` until its own expiry.
    ///
    /// The signature is checked but expiry is not, so an expired token can
    /// still be revoked. Revoking the same token twice is not an error.
    pub async fn revoke(&self, token: &str) -> AppResult<()> {
        let claims = self
            .codec
            .decode(token)
            .map_err(|_| AppError::validation("Invalid token"))?;

        let expires_at = claims
            .expires_at()
            .ok_or_else(|| AppError::validation("Invalid token"))?;

        self.revoked.insert(token, expires_at).await?;
        info!(username = %claims.sub, "Token revoked");
        Ok(())
    }

    /// The underlying codec.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }
}

fn expires_after(now: DateTime<Utc>, ttl: Duration) -> AppResult<DateTime<Utc>> {
    now.checked_add_signed(ttl)
        .ok_or_else(|| AppError::internal("Token lifetime is out of range"))
}

fn configured_ttl(
    key: &str,
    value: u64,
    to_duration: fn(i64) -> Option<Duration>,
) -> AppResult<Duration> {
    let invalid = || {
        AppError::configuration(format!(
            "auth.{key} must be a positive lifetime within the supported date range, got {value}"
        ))
    };

    if value == 0 {
        return Err(invalid());
    }

    let ttl = i64::try_from(value)
        .ok()
        .and_then(to_duration)
        .ok_or_else(invalid)?;
    Utc::now().checked_add_signed(ttl).ok_or_else(invalid)?;
    Ok(ttl)
}
