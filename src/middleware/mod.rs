//! The middleware abstraction of the dispatch pipeline.
//!
//! A middleware wraps the remainder of the chain onion-style: code before its
//! `next.run()` call executes on the way in, code after it on the way out. A
//! middleware may short-circuit by returning without running `next`, transform
//! the value `next` produced, or fail; errors from inner layers propagate
//! unchanged unless a middleware handles them explicitly.
//!
//! [`Next::run`] consumes the continuation, so a middleware can run the rest
//! of the chain at most once.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod cache;
pub mod delay;
pub mod log;

pub use self::cache::CacheMiddleware;
pub use self::delay::DelayMiddleware;
pub use self::log::LogMiddleware;

/// Per-request context handed to every middleware. Immutable for the call.
#[derive(Debug, Clone)]
pub struct Context {
    /// Backend-agnostic identifier of the requested resource; the cache key.
    pub key: String,
    /// Fully resolved backend URL for this call's mode.
    pub url: String,
}

impl Context {
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
        }
    }
}

/// One layer of the dispatch pipeline.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, context: &Context, next: Next<'_>) -> Result<Value>;
}

/// Terminal operation of the pipeline, innermost in the onion. In production
/// this is the HTTP fetch; tests substitute counting or canned fallbacks.
#[async_trait]
pub trait Fallback: Send + Sync {
    async fn call(&self, context: &Context) -> Result<Value>;
}

/// Continuation over the remaining middleware chain plus the terminal fallback.
pub struct Next<'a> {
    context: &'a Context,
    rest: &'a [Arc<dyn Middleware>],
    fallback: &'a (dyn Fallback + 'a),
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        context: &'a Context,
        rest: &'a [Arc<dyn Middleware>],
        fallback: &'a (dyn Fallback + 'a),
    ) -> Self {
        Self {
            context,
            rest,
            fallback,
        }
    }

    /// Run the remainder of the chain, ending in the fallback.
    pub async fn run(self) -> Result<Value> {
        match self.rest.split_first() {
            Some((head, rest)) => {
                let next = Next::new(self.context, rest, self.fallback);
                head.handle(self.context, next).await
            }
            None => self.fallback.call(self.context).await,
        }
    }
}
