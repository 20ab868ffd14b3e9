//! Cache Aside demo
//!
//! Wraps a slow lookup with the cache-aside interceptor over an in-memory
//! store and shows a miss followed by a hit.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_aside::{
    spawn_cleanup_task, CacheInterceptor, CacheKeySpec, Config, Invocation, MemoryStore,
    SystemClock,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

/// Stand-in for a database query.
async fn load_user(id: u64) -> Result<User, std::io::Error> {
    tokio::time::sleep(Duration::from_millis(200)).await;
    Ok(User {
        id,
        name: "Ann".to_string(),
    })
}

/// Main entry point for the demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the memory store and start the TTL cleanup task
/// 4. Run the same lookup twice through the interceptor
/// 5. Log interceptor and store statistics, then stop the cleanup task
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_aside=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, max_key_length={}, cleanup_interval={}s",
        config.max_entries, config.max_key_length, config.cleanup_interval
    );

    let clock = Arc::new(SystemClock);
    let store = Arc::new(MemoryStore::from_config(&config, clock.clone()));
    let cleanup_handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
    let interceptor = CacheInterceptor::with_clock(store.clone(), clock);

    let spec = CacheKeySpec::new("user:{id}", "id")
        .with_ttl(30)
        .prepare()
        .context("invalid cache key spec")?;

    for attempt in 1..=2 {
        let started = Instant::now();
        let lookup = Invocation::new(|| load_user(42))
            .with_parameters(["id"])
            .with_arguments([json!(42)]);
        let user = interceptor
            .intercept_prepared(&spec, lookup)
            .await
            .context("user lookup failed")?;
        info!(
            "Attempt {}: {} (id {}) in {:?}",
            attempt,
            user.name,
            user.id,
            started.elapsed()
        );
    }

    info!(
        "Interceptor stats: {}",
        serde_json::to_string(&interceptor.stats())?
    );
    info!("Store stats: {}", serde_json::to_string(&store.stats().await)?);

    cleanup_handle.abort();
    Ok(())
}
