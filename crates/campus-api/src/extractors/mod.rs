//! Custom Axum extractors.

pub mod auth;

pub use auth::{BearerToken, CurrentUser, bearer_token};
