//! Credential gate for the static `/data` tree.

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use regex::Regex;
use tracing::debug;

use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_database::CredentialStore;
use campus_entity::user::User;

use crate::gate::AuthGate;

/// Lesson thumbnails remain readable by inactive principals.
pub const THUMBNAIL_PATTERN: &str = r"^/data/lessons/L_\d+/.*\.(png|jpg)$";

/// Decides whether a static file request may be served.
#[derive(Debug, Clone)]
pub struct ResourceGuard {
    gate: Arc<AuthGate>,
    thumbnail: Regex,
}

impl ResourceGuard {
    /// Create a guard backed by `gate`.
    pub fn new(gate: Arc<AuthGate>) -> AppResult<Self> {
        let thumbnail = Regex::new(THUMBNAIL_PATTERN)
            .map_err(|e| AppError::internal(format!("Invalid thumbnail pattern: {e}")))?;
        Ok(Self { gate, thumbnail })
    }

    /// Whether `path` is a lesson thumbnail.
    ///
    /// `path` is matched after percent-decoding, as the file service
    /// resolves it.
    pub fn is_thumbnail(&self, path: &str) -> bool {
        self.thumbnail.is_match(&percent_decode_str(path).decode_utf8_lossy())
    }

    /// Authorize a request for `path` carrying the bearer `token`.
    ///
    /// `path` is the full request path including the `/data` prefix.
    pub async fn authorize(&self, token: Option<&str>, path: &str) -> AppResult<User> {
        let token = token.ok_or_else(|| AppError::unauthorized("Not authenticated"))?;
        let invalid = || AppError::unauthorized("Invalid or expired token");

        let username = self.gate.tokens().verify(token).await?.ok_or_else(invalid)?;
        let user = self
            .gate
            .users()
            .find_by_username(&username)
            .await?
            .ok_or_else(invalid)?;

        if !user.is_active && !self.is_thumbnail(path) {
            debug!(username = %user.username, path, "Rejected inactive principal on static file");
            return Err(AppError::inactive_account("Inactive user"));
        }

        Ok(user)
    }
}
