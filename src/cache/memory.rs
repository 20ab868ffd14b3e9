//! In-Memory Store Module
//!
//! Reference [`CacheStore`] combining HashMap storage with LRU tracking and
//! deadline-based expiration.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::cache::entry::expiry_for;
use crate::cache::{CacheEntry, CacheStore, LruTracker, StoreStats, MAX_KEY_LENGTH};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{StoreError, StoreResult};

/// An entry plus the instant the store drops it.
#[derive(Debug)]
struct Slot {
    entry: CacheEntry,
    deadline: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    slots: HashMap<String, Slot>,
    lru: LruTracker,
    stats: StoreStats,
}

// == Memory Store ==
/// Process-local store with LRU eviction and TTL support.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    clock: Arc<dyn Clock>,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Maximum key length in bytes
    max_key_length: usize,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a store holding at most `max_entries`, reading the system clock.
    pub fn new(max_entries: usize) -> Self {
        Self::with_clock(max_entries, Arc::new(SystemClock))
    }

    /// Creates a store that reads time from `clock`.
    pub fn with_clock(max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            clock,
            max_entries,
            max_key_length: MAX_KEY_LENGTH,
        }
    }

    /// Creates a store sized by `config`.
    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            max_key_length: config.max_key_length,
            ..Self::with_clock(config.max_entries, clock)
        }
    }

    // == Delete ==
    /// Removes an entry, returning whether it existed.
    pub async fn delete(&self, key: &str) -> bool {
        let mut inner = self.inner.write().await;
        let removed = inner.slots.remove(key).is_some();
        if removed {
            inner.lru.remove(key);
            let len = inner.slots.len();
            inner.stats.set_total_entries(len);
        }
        removed
    }

    // == Cleanup Expired ==
    /// Removes all entries whose deadline has passed.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let now = self.clock.now();
        let mut inner = self.inner.write().await;

        let expired_keys: Vec<String> = inner
            .slots
            .iter()
            .filter(|(_, slot)| now >= slot.deadline)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            inner.slots.remove(key);
            inner.lru.remove(key);
        }

        let len = inner.slots.len();
        inner.stats.set_total_entries(len);
        inner.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    /// Returns current store statistics.
    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.slots.len());
        stats
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.slots.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.slots.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    // == Get ==
    /// Returns a copy of the live entry for `key`.
    ///
    /// Expired entries are removed and read as absent.
    async fn get(&self, key: &str) -> StoreResult<Option<CacheEntry>> {
        let now = self.clock.now();
        // write lock: reads move the key in the LRU order
        let mut inner = self.inner.write().await;

        let expired = match inner.slots.get(key) {
            None => {
                inner.stats.record_miss();
                return Ok(None);
            }
            Some(slot) => now >= slot.deadline,
        };

        if expired {
            inner.slots.remove(key);
            inner.lru.remove(key);
            let len = inner.slots.len();
            inner.stats.set_total_entries(len);
            inner.stats.record_expirations(1);
            inner.stats.record_miss();
            return Ok(None);
        }

        inner.stats.record_hit();
        inner.lru.touch(key);
        Ok(inner.slots.get(key).map(|slot| slot.entry.clone()))
    }

    // == Set ==
    /// Stores `entry`, replacing any previous one.
    ///
    /// With a positive `ttl_seconds` the deadline is the earlier of the
    /// entry's own expiry and `now + ttl_seconds`. At capacity the least
    /// recently used entry is evicted.
    async fn set(&self, key: &str, entry: CacheEntry, ttl_seconds: u64) -> StoreResult<()> {
        if key.len() > self.max_key_length {
            return Err(StoreError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                self.max_key_length
            )));
        }

        let deadline = if ttl_seconds > 0 {
            entry.expires_at.min(expiry_for(self.clock.now(), ttl_seconds))
        } else {
            entry.expires_at
        };

        let mut inner = self.inner.write().await;
        let is_overwrite = inner.slots.contains_key(key);

        if !is_overwrite && inner.slots.len() >= self.max_entries {
            match inner.lru.evict_oldest() {
                Some(evicted_key) => {
                    inner.slots.remove(&evicted_key);
                    inner.stats.record_eviction();
                }
                None => {
                    return Err(StoreError::CacheFull(
                        "Store is full and eviction failed".to_string(),
                    ));
                }
            }
        }

        inner.slots.insert(key.to_string(), Slot { entry, deadline });
        inner.lru.touch(key);
        let len = inner.slots.len();
        inner.stats.set_total_entries(len);

        Ok(())
    }
}
