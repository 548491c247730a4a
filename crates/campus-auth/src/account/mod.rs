//! Account lifecycle: signup, login, profile updates, activation, deletion.

pub mod manager;

pub use manager::{AccountManager, NewAccount, ProfileUpdate};
