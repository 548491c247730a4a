//! Authorization gate: principal resolution, active-account policy and
//! role re-checks.

use std::sync::Arc;

use tracing::{debug, warn};

use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_database::CredentialStore;
use campus_entity::user::{User, UserRole};

use crate::jwt::TokenManager;

/// Paths on which an inactive principal is still resolved.
pub const ACTIVE_CHECK_BYPASS: &[&str] = &["/api/user/me"];

/// Roles allowed on administrator routes.
pub const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

/// Roles allowed on routes open to every signed-in account.
pub const ANY_USER: &[UserRole] = &[UserRole::User, UserRole::Admin];

/// Message shared by every role-check failure.
const ROLE_CHECK_FAILED: &str = "Invalid or expired token";

/// Resolves the principal behind a presented access token.
#[derive(Debug, Clone)]
pub struct AuthGate {
    tokens: Arc<TokenManager>,
    users: Arc<dyn CredentialStore>,
}

impl AuthGate {
    /// Create a gate over the given token manager and credential store.
    pub fn new(tokens: Arc<TokenManager>, users: Arc<dyn CredentialStore>) -> Self {
        Self { tokens, users }
    }

    /// The token manager used for verification.
    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// The credential store principals are loaded from.
    pub fn users(&self) -> &Arc<dyn CredentialStore> {
        &self.users
    }

    /// Resolve the principal for `token`, whether active or not.
    pub async fn resolve_current_principal(&self, token: &str) -> AppResult<User> {
        let username = self
            .tokens
            .verify(token)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not authenticated"))?;

        self.users
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Resolve the principal for `token` and require an active account,
    /// unless `path` is on the bypass list.
    pub async fn resolve_active_principal(&self, token: &str, path: &str) -> AppResult<User> {
        let user = self.resolve_current_principal(token).await?;

        if !user.is_active && !bypasses_active_check(path) {
            debug!(username = %user.username, path, "Rejected inactive principal");
            return Err(AppError::inactive_account("Inactive user"));
        }

        Ok(user)
    }
}

/// Whether `path` skips the inactive-account rejection.
pub fn bypasses_active_check(path: &str) -> bool {
    ACTIVE_CHECK_BYPASS.contains(&path)
}

/// Build a role check admitting `allowed_roles`.
pub fn require_role(allowed_roles: &'static [UserRole]) -> RoleCheck {
    RoleCheck { allowed_roles }
}

/// A role predicate produced by [`require_role`].
///
/// The check never trusts the already-resolved principal: it verifies the
/// token again and reloads the stored record before comparing roles.
#[derive(Debug, Clone, Copy)]
pub struct RoleCheck {
    allowed_roles: &'static [UserRole],
}

impl RoleCheck {
    /// Check `principal`, resolved earlier from `token`, against the
    /// allowed roles.
    ///
    /// Every rejection yields the same unauthorized error.
    pub async fn check(&self, gate: &AuthGate, token: &str, principal: &User) -> AppResult<()> {
        let denied = || {
            warn!(
                username = %principal.username,
                role = %principal.role,
                "Role check failed"
            );
            AppError::unauthorized(ROLE_CHECK_FAILED)
        };

        let Some(username) = gate.tokens.verify(token).await? else {
            return Err(denied());
        };
        if username != principal.username {
            return Err(denied());
        }

        let Some(stored) = gate.users.find_by_username(&username).await? else {
            return Err(denied());
        };
        if stored.role != principal.role {
            return Err(denied());
        }

        if !self.allowed_roles.contains(&principal.role) {
            return Err(denied());
        }

        Ok(())
    }
}
