//! Signed token encoding, decoding and lifecycle management.

pub mod claims;
pub mod codec;
pub mod manager;

pub use claims::Claims;
pub use codec::{TokenCodec, TokenError};
pub use manager::{TokenManager, TokenPair};
