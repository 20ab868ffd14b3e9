//! TTL Cleanup Task
//!
//! Background task that periodically removes expired entries from a
//! [`MemoryStore`].

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryStore;

/// Spawns a background task that periodically cleans up expired entries.
///
/// The task sleeps for the interval between runs and never exits on its
/// own; abort the returned handle to stop it.
///
/// # Arguments
/// * `store` - Shared store to sweep
/// * `cleanup_interval_secs` - Interval in seconds between cleanup runs
///
/// # Example
/// ```ignore
/// let store = Arc::new(MemoryStore::new(1000));
/// let cleanup_handle = spawn_cleanup_task(store.clone(), 1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(store: Arc<MemoryStore>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.cleanup_expired().await;

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
