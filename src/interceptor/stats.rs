//! Interceptor Statistics Module
//!
//! Lock-free counters for cache-aside decisions.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Interceptor Stats ==
/// Counters shared by every call through one interceptor.
#[derive(Debug, Default)]
pub struct InterceptorStats {
    hits: AtomicU64,
    misses: AtomicU64,
    bypasses: AtomicU64,
    degraded_reads: AtomicU64,
    type_mismatches: AtomicU64,
    writes: AtomicU64,
    failed_writes: AtomicU64,
    operation_failures: AtomicU64,
    uncached: AtomicU64,
}

impl InterceptorStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bypass(&self) {
        self.bypasses.fetch_add(1, Ordering::Relaxed);
    }

    /// A store read failed and was treated as a miss.
    pub fn record_degraded_read(&self) {
        self.degraded_reads.fetch_add(1, Ordering::Relaxed);
    }

    /// A stored entry was produced as a different type.
    pub fn record_type_mismatch(&self) {
        self.type_mismatches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    /// A fresh value could not be stored.
    pub fn record_failed_write(&self) {
        self.failed_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_operation_failure(&self) {
        self.operation_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// No key could be rendered, so the call ran without the cache.
    pub fn record_uncached(&self) {
        self.uncached.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the current counter values.
    pub fn snapshot(&self) -> InterceptorStatsSnapshot {
        InterceptorStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            bypasses: self.bypasses.load(Ordering::Relaxed),
            degraded_reads: self.degraded_reads.load(Ordering::Relaxed),
            type_mismatches: self.type_mismatches.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            failed_writes: self.failed_writes.load(Ordering::Relaxed),
            operation_failures: self.operation_failures.load(Ordering::Relaxed),
            uncached: self.uncached.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`InterceptorStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InterceptorStatsSnapshot {
    /// Calls answered from the store
    pub hits: u64,
    /// Reads that found nothing usable
    pub misses: u64,
    /// Calls that skipped the read
    pub bypasses: u64,
    /// Store read errors degraded to a miss
    pub degraded_reads: u64,
    /// Entries rejected because of their recorded type
    pub type_mismatches: u64,
    /// Entries stored
    pub writes: u64,
    /// Entries that could not be stored
    pub failed_writes: u64,
    /// Calls where the wrapped operation failed
    pub operation_failures: u64,
    /// Calls that ran without the cache because no key could be rendered
    pub uncached: u64,
}

impl InterceptorStatsSnapshot {
    /// Returns hits / (hits + misses), or 0.0 if nothing was read yet.
    ///
    /// Bypassed calls are not reads and do not count.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
