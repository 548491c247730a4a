//! Auth handlers: login, signup, refresh, logout.

use axum::extract::State;
use axum::{Form, Json};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use tracing::debug;

use campus_core::error::{AppError, ErrorKind};

use crate::dto::request::{LoginRequest, SignupRequest, validate_request};
use crate::dto::response::{MessageResponse, TokenResponse, UserSummary};
use crate::extractors::BearerToken;
use crate::state::AppState;

/// Name of the cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    validate_request(&req)?;

    let user = state.accounts.authenticate(&req.username, &req.password).await?;
    let pair = state.tokens.issue_pair(&user.username)?;

    let max_age = state.tokens.refresh_ttl().num_seconds();
    let cookie = Cookie::build((REFRESH_COOKIE, pair.refresh_token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(max_age))
        .build();

    Ok((jar.add(cookie), Json(TokenResponse::bearer(pair.access_token))))
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<UserSummary>, AppError> {
    validate_request(&req)?;
    let user = state.accounts.signup(req.into()).await?;
    Ok(Json(user.into()))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<TokenResponse>, AppError> {
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::validation("Refresh token not found"))?;

    let username = state
        .tokens
        .verify(&refresh_token)
        .await?
        .ok_or_else(|| AppError::validation("Invalid refresh token"))?;

    let access_token = state.tokens.issue_access(&username)?;
    Ok(Json(TokenResponse::bearer(access_token)))
}

/// POST /api/auth/logout
///
/// Revokes the presented access token and, when one is sent along, the
/// refresh cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    BearerToken(access_token): BearerToken,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    state.tokens.revoke(&access_token).await?;

    if let Some(cookie) = jar.get(REFRESH_COOKIE) {
        match state.tokens.revoke(cookie.value()).await {
            Ok(()) => {}
            Err(e) if e.kind == ErrorKind::Validation => {
                debug!("Ignoring undecodable refresh cookie on logout");
            }
            Err(e) => return Err(e),
        }
    }

    let jar = jar.remove(Cookie::build(REFRESH_COOKIE).path("/"));
    Ok((jar, Json(MessageResponse::new("Logout successful"))))
}
