//! The dispatch pipeline: a fixed middleware chain composed around a terminal
//! fallback, raced against the call's cancellation signal.

use std::sync::Arc;

use serde_json::Value;

use crate::abort::AbortSignal;
use crate::error::{RegionsError, Result};
use crate::middleware::{Context, Fallback, Middleware, Next};

/// A statically composed middleware chain. Built once per client; each call
/// threads a fresh [`Context`] through the same chain.
///
/// The pipeline holds no cross-call state of its own, and concurrent calls for
/// the same key are not de-duplicated; any sharing lives in middleware
/// closures (e.g. the caching middleware's driver).
pub struct Pipeline {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl Pipeline {
    pub fn new(middlewares: Vec<Arc<dyn Middleware>>) -> Self {
        Self { middlewares }
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Run the chain for one request.
    ///
    /// An already-fired signal fails with [`RegionsError::Aborted`] before any
    /// middleware or the fallback executes. A signal firing mid-flight wins
    /// the race instead: the call settles with `Aborted` exactly once and the
    /// chain future is dropped, cancelling whatever it was awaiting
    /// (including the terminal fetch).
    pub async fn dispatch(
        &self,
        context: &Context,
        fallback: &dyn Fallback,
        signal: Option<&AbortSignal>,
    ) -> Result<Value> {
        if let Some(signal) = signal {
            if signal.is_aborted() {
                return Err(RegionsError::Aborted);
            }
        }

        let chain = async {
            if self.middlewares.is_empty() {
                // Nothing to compose; skip the continuation machinery.
                fallback.call(context).await
            } else {
                Next::new(context, &self.middlewares, fallback).run().await
            }
        };

        match signal {
            None => chain.await,
            Some(signal) => {
                tokio::select! {
                    result = chain => result,
                    _ = signal.aborted() => Err(RegionsError::Aborted),
                }
            }
        }
    }
}
