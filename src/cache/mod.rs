//! Cache Module
//!
//! Stored entries, the store port, and an in-memory store with TTL
//! expiration and LRU eviction.

mod entry;
mod lru;
mod memory;
mod stats;
mod store;

// Re-export public types
pub use entry::{expiry_for, CacheEntry, TypeIdentity};
pub use lru::LruTracker;
pub use memory::MemoryStore;
pub use stats::StoreStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default maximum key length in bytes for [`MemoryStore`]
pub const MAX_KEY_LENGTH: usize = 256;
