use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{Context, Middleware, Next};
use crate::error::Result;

/// Adds artificial latency ahead of the rest of the chain. Useful for
/// exercising loading states and cancellation windows during development.
#[derive(Debug, Clone, Copy)]
pub struct DelayMiddleware {
    duration: Duration,
}

impl DelayMiddleware {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Default for DelayMiddleware {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

#[async_trait]
impl Middleware for DelayMiddleware {
    async fn handle(&self, _context: &Context, next: Next<'_>) -> Result<Value> {
        tokio::time::sleep(self.duration).await;
        next.run().await
    }
}
