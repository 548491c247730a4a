//! # campus-api
//!
//! HTTP API layer for Campus built on Axum.
//!
//! Provides the auth and user endpoints, the credential-gated `/data`
//! static mount, role-guard middleware, extractors, DTOs and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
