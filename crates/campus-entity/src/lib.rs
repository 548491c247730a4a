//! # campus-entity
//!
//! Domain entity models for Campus. Every struct in this crate represents a
//! database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`.

pub mod user;
