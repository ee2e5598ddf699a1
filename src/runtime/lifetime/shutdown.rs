use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::storage::SeaOrmStorage;

const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Resolve once Ctrl+C is received
pub async fn wait_for_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(
            "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
            e
        ),
    }
}

/// Close the database pool, giving up after a bounded wait
pub async fn close_storage(storage: &SeaOrmStorage) {
    match timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS), storage.close()).await {
        Ok(Ok(())) => info!("Database pool closed"),
        Ok(Err(e)) => error!("Failed to close database pool: {}", e),
        Err(_) => error!(
            "Closing the database timed out after {} seconds",
            SHUTDOWN_TIMEOUT_SECS
        ),
    }
}
