//! HTTP integration tests driving the full router over in-memory SQLite.

mod auth_test;
mod helpers;
mod user_test;
