//! Role guards for route groups.
//!
//! A guard resolves the active principal from the bearer token, re-checks
//! the role against the stored record and hands the principal to the
//! handler as [`CurrentUser`].

use axum::extract::{OriginalUri, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use campus_auth::gate::{self, RoleCheck};
use campus_core::error::AppError;
use campus_entity::user::UserRole;

use crate::extractors::{CurrentUser, bearer_token};
use crate::state::AppState;

/// State for one role-guarded route group.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    state: AppState,
    check: RoleCheck,
}

/// Build a guard admitting `allowed_roles`, for use with
/// `axum::middleware::from_fn_with_state(.., role_guard)`.
pub fn require_role(state: &AppState, allowed_roles: &'static [UserRole]) -> RoleGuard {
    RoleGuard {
        state: state.clone(),
        check: gate::require_role(allowed_roles),
    }
}

/// Middleware body for [`RoleGuard`].
pub async fn role_guard(
    State(guard): State<RoleGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::unauthorized("Not authenticated"))?;

    // Nested routers see a stripped URI; the bypass list uses full paths.
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let gate = &guard.state.gate;
    let principal = gate.resolve_active_principal(&token, &path).await?;
    guard.check.check(gate, &token, &principal).await?;

    request.extensions_mut().insert(CurrentUser(principal));
    Ok(next.run(request).await)
}
