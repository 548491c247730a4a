//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Placeholder secret shipped in the default configuration.
pub const DEFAULT_SECRET_KEY: &str = "CHANGE_ME_IN_PRODUCTION";

/// Token signing and lifetime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Symmetric secret used to sign and verify every token.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    /// JWS algorithm name; only the HMAC family is accepted.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// How often expired revocation records are pruned, in seconds.
    /// Zero disables pruning.
    #[serde(default = "default_purge_interval")]
    pub revoked_token_purge_interval_seconds: u64,
}

impl AuthConfig {
    /// Whether the placeholder secret is still in use.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            algorithm: default_algorithm(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl(),
            revoked_token_purge_interval_seconds: default_purge_interval(),
        }
    }
}

/// Credentials of the administrator created when the server starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdminConfig {
    /// Login name (must be email-shaped).
    #[serde(default = "default_admin_username")]
    pub username: String,
    /// Given name.
    #[serde(default = "default_admin_first_name")]
    pub first_name: String,
    /// Family name.
    #[serde(default = "default_admin_last_name")]
    pub last_name: String,
    /// Initial plaintext password, hashed before it is stored.
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for BootstrapAdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            first_name: default_admin_first_name(),
            last_name: default_admin_last_name(),
            password: default_admin_password(),
        }
    }
}

fn default_secret_key() -> String {
    DEFAULT_SECRET_KEY.to_string()
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_ttl() -> u64 {
    30
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_purge_interval() -> u64 {
    3600
}

fn default_admin_username() -> String {
    "admin@admin.com".to_string()
}

fn default_admin_first_name() -> String {
    "Admin".to_string()
}

fn default_admin_last_name() -> String {
    "User".to_string()
}

fn default_admin_password() -> String {
    "!Ch4ng3Th1sP4ssW0rd!".to_string()
}
