//! Token codec: signs and verifies claims with a single static secret.

use std::collections::HashSet;
use std::str::FromStr;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use campus_core::config::AuthConfig;
use campus_core::error::AppError;

use super::claims::Claims;

/// Failures produced by the codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token is not a well-formed signed token for this codec.
    #[error("malformed token: {0}")]
    Malformed(String),
    /// The signature does not match the configured secret and algorithm.
    #[error("invalid token signature")]
    InvalidSignature,
    /// The claims could not be signed.
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// Encodes and decodes [`Claims`].
///
/// Decoding checks signature integrity only; expiry is interpreted by the
/// token manager.
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl TokenCodec {
    /// Create a codec for the given secret and algorithm name.
    ///
    /// Only the HMAC family (`HS256`, `HS384`, `HS512`) is accepted.
    pub fn new(secret: &str, algorithm: &str) -> Result<Self, AppError> {
        let algorithm = Algorithm::from_str(algorithm).map_err(|_| {
            AppError::configuration(format!("Unknown token algorithm '{algorithm}'"))
        })?;

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AppError::configuration(format!(
                "Token algorithm {algorithm:?} is not an HMAC algorithm"
            )));
        }

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Create a codec from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        Self::new(&config.secret_key, &config.algorithm)
    }

    /// Sign `claims` into a compact token string.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify the signature of `token` and return its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}
