use std::time::Instant;

use async_trait::async_trait;
use log::info;
use serde_json::Value;

use super::{Context, Middleware, Next};
use crate::error::Result;

/// Logs each lookup with its wall-clock duration through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMiddleware;

impl LogMiddleware {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Middleware for LogMiddleware {
    async fn handle(&self, context: &Context, next: Next<'_>) -> Result<Value> {
        let start = Instant::now();
        let result = next.run().await;
        let elapsed = start.elapsed();
        match &result {
            Ok(_) => info!("GET {} ({:?})", context.url, elapsed),
            Err(err) => info!("GET {} failed: {err} ({:?})", context.url, elapsed),
        }
        result
    }
}
