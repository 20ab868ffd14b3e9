//! LRU Tracker Module
//!
//! Least Recently Used ordering for store eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// Every touch stamps the key with a fresh generation; the smallest live
/// generation is the least recently used key.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Latest generation per key
    generations: HashMap<String, u64>,
    /// Generation to key, oldest first
    order: BTreeMap<u64, String>,
    next_generation: u64,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, tracking it if new.
    pub fn touch(&mut self, key: &str) {
        let generation = self.next_generation;
        self.next_generation += 1;

        if let Some(previous) = self.generations.insert(key.to_string(), generation) {
            self.order.remove(&previous);
        }
        self.order.insert(generation, key.to_string());
    }

    /// Stops tracking a key.
    pub fn remove(&mut self, key: &str) {
        if let Some(generation) = self.generations.remove(key) {
            self.order.remove(&generation);
        }
    }

    // == Evict Oldest ==
    /// Returns and forgets the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.generations.remove(&key);
        Some(key)
    }

    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.values().next().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.generations.contains_key(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.peek_oldest(), None);
    }

    #[test]
    fn test_lru_touch_existing_key_moves_it_last() {
        let mut lru = LruTracker::new();
        lru.touch("user:1");
        lru.touch("user:2");
        lru.touch("user:3");

        lru.touch("user:1");

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_oldest(), Some("user:2"));
    }

    #[test]
    fn test_lru_eviction_order() {
        let mut lru = LruTracker::new();
        for key in ["a", "b", "c"] {
            lru.touch(key);
        }
        lru.touch("a");
        lru.touch("c");
        lru.touch("b");

        assert_eq!(lru.evict_oldest().as_deref(), Some("a"));
        assert_eq!(lru.evict_oldest().as_deref(), Some("c"));
        assert_eq!(lru.evict_oldest().as_deref(), Some("b"));
        assert_eq!(lru.evict_oldest(), None);
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruTracker::new();
        lru.touch("a");
        lru.touch("b");

        lru.remove("a");
        lru.remove("missing");

        assert!(!lru.contains("a"));
        assert!(lru.contains("b"));
        assert_eq!(lru.evict_oldest().as_deref(), Some("b"));
    }

    #[test]
    fn test_lru_repeated_touch_tracks_once() {
        let mut lru = LruTracker::new();
        lru.touch("a");
        lru.touch("a");
        lru.touch("a");

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evict_oldest().as_deref(), Some("a"));
        assert!(lru.is_empty());
    }
}
