//! Argon2id hashing and the password policy applied at signup and on
//! password change.

pub mod hasher;
pub mod validator;

pub use hasher::PasswordHasher;
pub use validator::PasswordValidator;
