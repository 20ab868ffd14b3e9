//! Cache-Aside Interceptor
//!
//! Wraps one call of an [`Operation`] with read-through / write-through
//! caching: build key, decide bypass, read, invoke on miss, store.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::cache::{CacheEntry, CacheStore};
use crate::clock::{Clock, SystemClock};
use crate::error::{ConfigError, InterceptError};
use crate::interceptor::{InterceptorStats, InterceptorStatsSnapshot, Marker, Operation};
use crate::key::{ArgumentMap, CacheKeySpec, PreparedKeySpec};

// == Cache Interceptor ==
/// Applies cache-aside semantics around wrapped operations.
///
/// Holds no lock. Concurrent misses on one key each invoke the operation
/// and each write the store.
#[derive(Clone)]
pub struct CacheInterceptor {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    stats: Arc<InterceptorStats>,
}

impl std::fmt::Debug for CacheInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheInterceptor")
            .field("clock", &self.clock)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl CacheInterceptor {
    /// Creates an interceptor over `store` reading the system clock.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates an interceptor that timestamps entries with `clock`.
    pub fn with_clock(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            stats: Arc::new(InterceptorStats::new()),
        }
    }

    /// Current counter values.
    pub fn stats(&self) -> InterceptorStatsSnapshot {
        self.stats.snapshot()
    }

    // == Intercept ==
    /// Runs `operation` through the cache according to `spec`.
    ///
    /// Returns the cached value on a hit without invoking the operation.
    /// Otherwise invokes it, stores the result, and returns it. Store
    /// failures never reach the caller; configuration errors and the
    /// operation's own error do.
    pub async fn intercept<O>(
        &self,
        spec: &CacheKeySpec,
        operation: O,
    ) -> Result<O::Output, InterceptError<O::Error>>
    where
        O: Operation,
        O::Output: Serialize + DeserializeOwned,
    {
        let prepared = spec.prepare().map_err(|err| {
            report_config_error(spec, &err);
            err
        })?;
        self.intercept_prepared(&prepared, operation).await
    }

    /// Same as [`intercept`](Self::intercept) for a spec parsed up front.
    pub async fn intercept_prepared<O>(
        &self,
        prepared: &PreparedKeySpec,
        operation: O,
    ) -> Result<O::Output, InterceptError<O::Error>>
    where
        O: Operation,
        O::Output: Serialize + DeserializeOwned,
    {
        let key = match self.key_for(prepared, &operation) {
            Ok(key) => key,
            Err(ConfigError::UnresolvedPath(reference)) => {
                // the arguments of this call lack the value, the declaration is fine
                self.stats.record_uncached();
                warn!(
                    template = %prepared.spec().template,
                    reference = %reference,
                    "key reference has no value in this call's arguments, running uncached"
                );
                return self.invoke(operation, &prepared.spec().template).await;
            }
            Err(err) => {
                report_config_error(prepared.spec(), &err);
                return Err(err.into());
            }
        };

        let can_read = !operation.markers().contains(&Marker::Evictable);
        if can_read {
            if let Some(value) = self.read::<O::Output>(&key).await {
                self.stats.record_hit();
                debug!(key = %key, "cache hit");
                return Ok(value);
            }
            self.stats.record_miss();
            debug!(key = %key, "cache miss");
        } else {
            self.stats.record_bypass();
            debug!(key = %key, "cache read bypassed for evictable operation");
        }

        let value = self.invoke(operation, &key).await?;

        let ttl_seconds = prepared.ttl_seconds();
        let entry = self.entry_for(&key, &value, ttl_seconds);
        if let Some(entry) = entry {
            self.write(&key, entry, ttl_seconds).await;
        }
        Ok(value)
    }

    /// Renders the key for this call's arguments.
    fn key_for<O: Operation>(
        &self,
        prepared: &PreparedKeySpec,
        operation: &O,
    ) -> Result<String, ConfigError> {
        let args = ArgumentMap::from_parts(
            operation.parameter_names().iter().cloned(),
            operation.arguments().iter().cloned(),
        )?;
        prepared.key_template().render(&args)
    }

    /// Invokes the real operation; its error is passed through untouched.
    async fn invoke<O: Operation>(
        &self,
        operation: O,
        label: &str,
    ) -> Result<O::Output, InterceptError<O::Error>> {
        operation.invoke().await.map_err(|err| {
            self.stats.record_operation_failure();
            debug!(key = %label, "operation failed, nothing cached");
            InterceptError::Operation(err)
        })
    }

    // == Read ==
    /// Looks up a usable value for `key`.
    ///
    /// Anything that is not a live, non-null entry of type `T` reads as
    /// `None`; store errors are logged and counted.
    async fn read<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let entry = match self.store.get(key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(err) => {
                self.stats.record_degraded_read();
                warn!(key = %key, "cache read failed, recomputing: {}", err);
                return None;
            }
        };

        if entry.value.is_null() || entry.is_expired_at(self.clock.now()) {
            return None;
        }

        if !entry.holds::<T>() {
            self.stats.record_type_mismatch();
            warn!(
                key = %key,
                stored = %entry.type_identity.type_name,
                expected = std::any::type_name::<T>(),
                "cached value has a different type, recomputing"
            );
            return None;
        }

        match entry.decode::<T>() {
            Ok(value) => Some(value),
            Err(err) => {
                self.stats.record_degraded_read();
                warn!(key = %key, "cached value could not be decoded, recomputing: {}", err);
                None
            }
        }
    }

    /// Wraps a fresh value in an entry stamped now.
    fn entry_for<T: Serialize>(&self, key: &str, value: &T, ttl_seconds: u64) -> Option<CacheEntry> {
        match CacheEntry::new(value, self.clock.now(), ttl_seconds) {
            Ok(entry) => Some(entry),
            Err(err) => {
                self.stats.record_failed_write();
                warn!(key = %key, "result could not be serialized, not cached: {}", err);
                None
            }
        }
    }

    // == Write ==
    /// Stores an entry; failures are logged and swallowed.
    async fn write(&self, key: &str, entry: CacheEntry, ttl_seconds: u64) {
        match self.store.set(key, entry, ttl_seconds).await {
            Ok(()) => {
                self.stats.record_write();
                debug!(key = %key, ttl_seconds, "cache populated");
            }
            Err(err) => {
                self.stats.record_failed_write();
                warn!(key = %key, "cache write failed, returning fresh value: {}", err);
            }
        }
    }
}

/// Configuration errors are logged loudly; they mean a mis-declared call site.
fn report_config_error(spec: &CacheKeySpec, err: &ConfigError) {
    error!(
        template = %spec.template,
        expression = %spec.expression,
        "cache key configuration error: {}",
        err
    );
}
