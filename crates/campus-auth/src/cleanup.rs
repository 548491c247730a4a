//! Periodic pruning of expired revocation records.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use campus_core::error::AppError;
use campus_database::RevokedTokenStore;

/// Removes revocation records whose token has expired anyway.
#[derive(Debug, Clone)]
pub struct RevokedTokenCleanup {
    store: Arc<dyn RevokedTokenStore>,
}

impl RevokedTokenCleanup {
    /// Create a cleanup handler over `store`.
    pub fn new(store: Arc<dyn RevokedTokenStore>) -> Self {
        Self { store }
    }

    /// Runs one cleanup cycle and returns the number of records removed.
    pub async fn run_cleanup(&self) -> Result<u64, AppError> {
        let removed = self.store.purge_expired(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "Pruned expired revoked tokens");
        } else {
            debug!("No expired revoked tokens to prune");
        }
        Ok(removed)
    }

    /// Run cleanup every `every` until `shutdown` flips to `true`.
    pub fn spawn(self, every: Duration, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(interval_seconds = every.as_secs(), "Revoked token cleanup started");
            let mut ticker = tokio::time::interval(every);

            loop {
                tokio::select! {
                    _ = shutdown.changed() => {
                        if *shutdown.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = self.run_cleanup().await {
                            error!(error = %e, "Revoked token cleanup failed");
                        }
                    }
                }
            }

            info!("Revoked token cleanup stopped");
        })
    }
}
