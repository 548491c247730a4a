//! # campus-auth
//!
//! Authentication and authorization core for Campus.
//!
//! ## Modules
//!
//! - `jwt`: signed token codec and the token lifecycle manager (issue, verify, revoke)
//! - `gate`: principal resolution, active-account policy and role re-checks
//! - `resource`: credential gate in front of the static `/data` tree
//! - `password`: Argon2id password hashing and policy enforcement
//! - `account`: signup, login, profile and activation management
//! - `cleanup`: periodic pruning of expired revocation records

pub mod account;
pub mod cleanup;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod resource;

pub use account::{AccountManager, NewAccount, ProfileUpdate};
pub use cleanup::RevokedTokenCleanup;
pub use gate::{ADMIN_ONLY, ANY_USER, AuthGate, RoleCheck, require_role};
pub use jwt::{Claims, TokenCodec, TokenError, TokenManager, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
pub use resource::ResourceGuard;
