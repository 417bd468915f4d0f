use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use super::{Context, Middleware, Next};
use crate::cache::{CacheDriver, MemoryDriver};
use crate::error::Result;

/// Memoizes responses by logical key.
///
/// A hit short-circuits the rest of the chain; a miss runs it and stores the
/// produced value. Concurrent calls for the same key are not coalesced: both
/// may miss and both may fetch, the later store simply overwriting the earlier.
pub struct CacheMiddleware {
    driver: Arc<dyn CacheDriver>,
}

impl CacheMiddleware {
    /// Cache into the given driver.
    pub fn with_driver(driver: Arc<dyn CacheDriver>) -> Self {
        Self { driver }
    }

    /// Cache into a fresh in-memory driver.
    pub fn new() -> Self {
        Self::with_driver(Arc::new(MemoryDriver::new()))
    }

    /// The backing driver, e.g. for inspection or explicit invalidation.
    pub fn driver(&self) -> Arc<dyn CacheDriver> {
        Arc::clone(&self.driver)
    }
}

impl Default for CacheMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Middleware for CacheMiddleware {
    async fn handle(&self, context: &Context, next: Next<'_>) -> Result<Value> {
        if let Some(cached) = self.driver.get(&context.key).await? {
            debug!("cache hit: {}", context.key);
            return Ok(cached);
        }

        debug!("cache miss: {}", context.key);
        let value = next.run().await?;
        self.driver.set(&context.key, value.clone()).await?;
        Ok(value)
    }
}
