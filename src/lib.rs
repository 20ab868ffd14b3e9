//! Cache Aside - read-through caching for arbitrary operations
//!
//! Wraps an operation so repeated calls with the same logical arguments are
//! answered from a [`CacheStore`] until the cached value expires.
//!
//! ```
//! use std::sync::Arc;
//! use cache_aside::{CacheInterceptor, CacheKeySpec, Invocation, MemoryStore};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let interceptor = CacheInterceptor::new(Arc::new(MemoryStore::new(100)));
//! let spec = CacheKeySpec::new("user:{id}", "id").with_ttl(30);
//!
//! let lookup = Invocation::new(|| async { Ok::<_, std::io::Error>("Ann".to_string()) })
//!     .with_parameters(["id"])
//!     .with_arguments([json!(42)]);
//! let name = interceptor.intercept(&spec, lookup).await.unwrap();
//! assert_eq!(name, "Ann");
//! # });
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod key;
pub mod tasks;

pub use cache::{CacheEntry, CacheStore, MemoryStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{ConfigError, InterceptError, StoreError};
pub use interceptor::{CacheInterceptor, Invocation, Marker, Operation};
pub use key::{build_key, ArgumentMap, CacheKeySpec, PreparedKeySpec};
pub use tasks::spawn_cleanup_task;
