//! Cache Entry Module
//!
//! Defines the structure stored per key, with its expiry and type identity.

use chrono::{DateTime, Months, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Type Identity ==
/// Names the Rust type a stored value was produced as.
///
/// Stores are type-erased, so readers compare this before decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeIdentity {
    /// Leading crate segment of the type path, empty for primitives
    pub module: String,
    /// Full type path as reported by the compiler
    pub type_name: String,
}

impl TypeIdentity {
    /// Identity of `T`.
    pub fn of<T: ?Sized>() -> Self {
        let type_name = std::any::type_name::<T>();
        // only the outer path counts: `alloc::vec::Vec<my_app::User>` is `alloc`
        let outer = type_name.split('<').next().unwrap_or(type_name);
        let module = outer
            .split_once("::")
            .map(|(module, _)| module.trim_start_matches(['&', '(', '[', ' ']))
            .unwrap_or_default();

        Self {
            module: module.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

// == Cache Entry ==
/// A single cached result with its timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Expiration timestamp, always after `created_at`
    pub expires_at: DateTime<Utc>,
    /// Type the value was produced as
    pub type_identity: TypeIdentity,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry for `value` written at `now`.
    ///
    /// # Arguments
    /// * `value` - The result to store
    /// * `now` - Write time
    /// * `ttl_seconds` - TTL in seconds, 0 for the long-lived default
    pub fn new<T: Serialize>(value: &T, now: DateTime<Utc>, ttl_seconds: u64) -> serde_json::Result<Self> {
        Ok(Self {
            value: serde_json::to_value(value)?,
            created_at: now,
            expires_at: expiry_for(now, ttl_seconds),
            type_identity: TypeIdentity::of::<T>(),
        })
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` reaches `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Remaining lifetime at `now`, zero once expired.
    pub fn ttl_remaining_at(&self, now: DateTime<Utc>) -> TimeDelta {
        (self.expires_at - now).max(TimeDelta::zero())
    }

    /// Returns true if the entry was produced as a `T`.
    pub fn holds<T: ?Sized>(&self) -> bool {
        self.type_identity == TypeIdentity::of::<T>()
    }

    /// Decodes the stored value as `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.value)
    }
}

// == Expiry ==
/// Computes `expires_at` for a write at `now`.
///
/// A positive TTL adds that many seconds; zero means twelve calendar months.
/// Saturates at the latest representable instant.
pub fn expiry_for(now: DateTime<Utc>, ttl_seconds: u64) -> DateTime<Utc> {
    let expiry = if ttl_seconds > 0 {
        i64::try_from(ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
    } else {
        now.checked_add_months(Months::new(12))
    };
    expiry.unwrap_or(DateTime::<Utc>::MAX_UTC)
}
