//! Interceptor Module
//!
//! Cache-aside orchestration around wrapped operations.
//!
//! # Flow
//! 1. Pair declared parameter names with runtime arguments
//! 2. Build the cache key
//! 3. Skip the read for [`Marker::Evictable`] operations
//! 4. Return a live cached value, or invoke the operation
//! 5. Store the fresh value with its expiry and return it

mod cache_aside;
mod operation;
mod stats;


pub use cache_aside::CacheInterceptor;
pub use operation::{Invocation, Marker, Operation};
pub use stats::{InterceptorStats, InterceptorStatsSnapshot};
