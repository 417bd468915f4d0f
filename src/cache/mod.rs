//! Pluggable key/value store backing the caching middleware.
//!
//! The driver is a pure memoization map: no TTL, no eviction, no size bound.
//! Callers needing any of those supply their own [`CacheDriver`]
//! implementation (an out-of-process store, an LRU, ...) and report failures
//! through [`RegionsError::Cache`](crate::RegionsError::Cache).

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod memory;

pub use memory::MemoryDriver;

/// Asynchronous key/value store keyed by logical request keys.
#[async_trait]
pub trait CacheDriver: Send + Sync {
    /// Look up a previously stored value. A miss is `Ok(None)`, never an error.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store a value, overwriting any prior entry for the key.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Remove an entry if present; a no-op otherwise.
    async fn delete(&self, key: &str) -> Result<()>;
}
