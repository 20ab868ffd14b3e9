//! Cache Store Port
//!
//! The key-value backend the interceptor reads from and writes to.

use async_trait::async_trait;

use crate::cache::CacheEntry;
use crate::error::StoreResult;

/// Pluggable key-value backend for cached entries.
///
/// Implementations must tolerate concurrent `get`/`set` from many callers.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Reads the entry for `key`.
    ///
    /// A clean miss is `Ok(None)`; `Err` means the store itself failed.
    async fn get(&self, key: &str) -> StoreResult<Option<CacheEntry>>;

    /// Replaces the entry for `key`.
    ///
    /// `ttl_seconds` is an eviction hint; `0` means rely on `entry.expires_at`.
    async fn set(&self, key: &str, entry: CacheEntry, ttl_seconds: u64) -> StoreResult<()>;
}
