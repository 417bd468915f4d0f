//! HTTP client construction.

use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};

use crate::error::{RegionsError, Result};

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

fn builder(timeout: Duration, user_agent: &str) -> ClientBuilder {
    ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(timeout)
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .user_agent(user_agent.to_string())
        .use_rustls_tls()
}

pub(crate) fn default_user_agent() -> String {
    format!("regions-of-indonesia/{}", env!("CARGO_PKG_VERSION"))
}

/// Shared client used by clients built with default HTTP settings, so that
/// connection pools are reused across client instances.
static SHARED_CLIENT: Lazy<Client> = Lazy::new(|| {
    builder(DEFAULT_TIMEOUT, &default_user_agent())
        .build()
        .expect("Failed to create HTTP client")
});

pub(crate) fn shared_client() -> Client {
    SHARED_CLIENT.clone()
}

/// Client with caller-specified timeout and user agent.
pub(crate) fn build_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    builder(timeout, user_agent)
        .build()
        .map_err(RegionsError::Network)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_client_is_cloneable() {
        let _first = shared_client();
        let _second = shared_client();
    }

    #[test]
    fn custom_client_builds() {
        let client = build_client(Duration::from_secs(5), "test-agent/1.0");
        assert!(client.is_ok());
    }
}
