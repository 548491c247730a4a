//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use campus_auth::{AccountManager, AuthGate, ResourceGuard, TokenManager};
use campus_core::config::AppConfig;
use campus_core::result::AppResult;
use campus_database::{CredentialStore, RevokedTokenStore};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token issuance, verification and revocation
    pub tokens: Arc<TokenManager>,
    /// Principal resolution and role checks
    pub gate: Arc<AuthGate>,
    /// Credential gate for `/data`
    pub resource_guard: Arc<ResourceGuard>,
    /// Account management
    pub accounts: Arc<AccountManager>,
}

impl AppState {
    /// Wire the auth components over the given stores.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn CredentialStore>,
        revoked: Arc<dyn RevokedTokenStore>,
    ) -> AppResult<Self> {
        let tokens = Arc::new(TokenManager::from_config(&config.auth, revoked)?);
        let gate = Arc::new(AuthGate::new(Arc::clone(&tokens), Arc::clone(&users)));
        let resource_guard = Arc::new(ResourceGuard::new(Arc::clone(&gate))?);
        let accounts = Arc::new(AccountManager::new(users)?);

        Ok(Self {
            config: Arc::new(config),
            tokens,
            gate,
            resource_guard,
            accounts,
        })
    }
}
