//! Route definitions for the Campus HTTP API.
//!
//! JSON routes are mounted under `/api`; the lesson file tree is served
//! under `/data` behind the resource guard.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use campus_auth::{ADMIN_ONLY, ANY_USER};

use crate::handlers;
use crate::middleware;
use crate::middleware::rbac::{require_role, role_guard};
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes(&state))
        .merge(health_routes());

    let static_files = ServiceBuilder::new()
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::static_files::guard_static_files,
        ))
        .service(ServeDir::new(&state.config.server.data_dir));

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/data", static_files)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, signup, refresh, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// User endpoints, split by the role guard in front of them
fn user_routes(state: &AppState) -> Router<AppState> {
    let self_service = Router::new()
        .route("/user/me", get(handlers::user::me))
        .route("/user/update/{user_id}", patch(handlers::user::update_user))
        .route_layer(axum_middleware::from_fn_with_state(
            require_role(state, ANY_USER),
            role_guard,
        ));

    let admin = Router::new()
        .route("/user/all", get(handlers::user::list_all))
        .route("/user/get/{user_id}", get(handlers::user::get_user))
        .route("/user/inactive", get(handlers::user::list_inactive))
        .route(
            "/user/activate-status/{user_id}",
            patch(handlers::user::set_active_status),
        )
        .route("/user/delete/{user_id}", delete(handlers::user::delete_user))
        .route_layer(axum_middleware::from_fn_with_state(
            require_role(state, ADMIN_ONLY),
            role_guard,
        ));

    self_service.merge(admin)
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
