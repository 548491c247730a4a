//! User management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use campus_core::error::AppError;

use crate::dto::request::{ActiveStatusQuery, UpdateUserRequest, validate_request};
use crate::dto::response::{MessageResponse, UserSummary};
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/user/all
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<UserSummary>>, AppError> {
    let users = state.accounts.list_all().await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// GET /api/user/get/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserSummary>, AppError> {
    Ok(Json(state.accounts.get(user_id).await?.into()))
}

/// GET /api/user/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserSummary> {
    Json(user.into())
}

/// GET /api/user/inactive
pub async fn list_inactive(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let users = state.accounts.list_inactive().await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// PATCH /api/user/update/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    actor: CurrentUser,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_request(&req)?;
    state
        .accounts
        .update_profile(&actor, user_id, req.into())
        .await?;
    Ok(Json(MessageResponse::new("User updated successfully")))
}

/// PATCH /api/user/activate-status/{user_id}?status=bool
pub async fn set_active_status(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<ActiveStatusQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .accounts
        .set_active_status(user_id, query.status)
        .await?;
    let message = if query.status {
        "User activated successfully"
    } else {
        "User deactivated successfully"
    };
    Ok(Json(MessageResponse::new(message)))
}

/// DELETE /api/user/delete/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    actor: CurrentUser,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.accounts.delete(&actor, user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
