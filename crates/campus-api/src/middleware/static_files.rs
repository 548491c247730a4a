//! Credential gate in front of the `/data` static file service.

use axum::extract::{OriginalUri, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use campus_core::error::AppError;

use crate::extractors::bearer_token;
use crate::state::AppState;

/// Authorize a static file request before it reaches `ServeDir`.
pub async fn guard_static_files(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers());
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    state
        .resource_guard
        .authorize(token.as_deref(), &path)
        .await?;

    Ok(next.run(request).await)
}
