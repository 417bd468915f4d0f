//! The top-level client and its per-kind resource facades.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::abort::AbortSignal;
use crate::code::Level;
use crate::error::{RegionsError, Result};
use crate::http;
use crate::middleware::{CacheMiddleware, Context, Fallback, LogMiddleware, Middleware};
use crate::path::{self, Mode};
use crate::pipeline::Pipeline;
use crate::types::{Region, SearchResult};

pub const DEFAULT_DYNAMIC_BASE_URL: &str = "https://regions-of-indonesia.deno.dev";
pub const DEFAULT_STATIC_BASE_URL: &str = "https://regions-of-indonesia.github.io/static-api";

/// Root URLs of the two backends.
#[derive(Debug, Clone)]
pub struct BaseUrl {
    pub dynamic: String,
    pub static_: String,
}

impl BaseUrl {
    fn for_mode(&self, mode: Mode) -> &str {
        match mode {
            Mode::Dynamic => &self.dynamic,
            Mode::Static => &self.static_,
        }
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            dynamic: DEFAULT_DYNAMIC_BASE_URL.to_string(),
            static_: DEFAULT_STATIC_BASE_URL.to_string(),
        }
    }
}

/// Client configuration, resolved once at construction.
pub struct ClientOptions {
    /// Backend root URLs.
    pub base_url: BaseUrl,
    /// Default backend mode for calls that do not override it.
    pub static_mode: bool,
    /// Replacement middleware chain; `None` selects the default chain.
    pub middlewares: Option<Vec<Arc<dyn Middleware>>>,
    /// Whether the default chain includes the timing log middleware.
    /// Ignored when `middlewares` is supplied.
    pub logger: bool,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent header.
    pub user_agent: String,
    /// HTTP client to use instead of the built-in pooled one.
    pub http: Option<reqwest::Client>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            static_mode: false,
            middlewares: None,
            logger: true,
            timeout: http::DEFAULT_TIMEOUT,
            user_agent: http::default_user_agent(),
            http: None,
        }
    }
}

impl ClientOptions {
    fn resolve_middlewares(&mut self) -> Vec<Arc<dyn Middleware>> {
        match self.middlewares.take() {
            Some(middlewares) => middlewares,
            None if self.logger => vec![
                Arc::new(LogMiddleware::new()),
                Arc::new(CacheMiddleware::new()),
            ],
            None => vec![Arc::new(CacheMiddleware::new())],
        }
    }

    fn resolve_http(&mut self) -> Result<reqwest::Client> {
        if let Some(client) = self.http.take() {
            return Ok(client);
        }
        if self.timeout == http::DEFAULT_TIMEOUT && self.user_agent == http::default_user_agent() {
            return Ok(http::shared_client());
        }
        http::build_client(self.timeout, &self.user_agent)
    }
}

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Cancellation signal for this call.
    pub signal: Option<AbortSignal>,
    /// Backend mode override for exactly this call.
    pub static_mode: Option<bool>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn with_static(mut self, static_mode: bool) -> Self {
        self.static_mode = Some(static_mode);
        self
    }
}

/// Terminal fetch: one GET of the resolved URL, body parsed as JSON.
///
/// The request future races the call's signal, so cancelling also abandons the
/// transfer rather than only discarding its result.
struct HttpFallback<'a> {
    http: &'a reqwest::Client,
    signal: Option<&'a AbortSignal>,
}

impl HttpFallback<'_> {
    async fn request(&self, url: &str) -> Result<Value> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RegionsError::Upstream {
                status: status.as_u16(),
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl Fallback for HttpFallback<'_> {
    async fn call(&self, context: &Context) -> Result<Value> {
        match self.signal {
            None => self.request(&context.url).await,
            Some(signal) => {
                tokio::select! {
                    result = self.request(&context.url) => result,
                    _ = signal.aborted() => Err(RegionsError::Aborted),
                }
            }
        }
    }
}

struct ClientInner {
    http: reqwest::Client,
    base_url: BaseUrl,
    static_mode: bool,
    pipeline: Pipeline,
}

impl ClientInner {
    fn mode(&self, options: &Options) -> Mode {
        match options.static_mode.unwrap_or(self.static_mode) {
            true => Mode::Static,
            false => Mode::Dynamic,
        }
    }

    fn url(&self, key: &str, mode: Mode) -> String {
        let base = self.base_url.for_mode(mode).trim_end_matches('/');
        format!("{base}/{}", path::url_path(key, mode))
    }

    async fn fetch(&self, key: String, options: &Options) -> Result<Value> {
        let url = self.url(&key, self.mode(options));
        let context = Context::new(key, url);
        let fallback = HttpFallback {
            http: &self.http,
            signal: options.signal.as_ref(),
        };
        self.pipeline
            .dispatch(&context, &fallback, options.signal.as_ref())
            .await
    }

    async fn fetch_as<T: DeserializeOwned>(&self, key: String, options: &Options) -> Result<T> {
        let value = self.fetch(key, options).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Province facade: the top of the hierarchy, so `find` takes no parent code.
pub struct Province {
    inner: Arc<ClientInner>,
}

impl Province {
    /// List all provinces.
    pub async fn find(&self, options: &Options) -> Result<Vec<Region>> {
        self.inner.fetch_as(path::provinces(), options).await
    }

    /// Fetch a single province by its exact code.
    pub async fn find_by(&self, code: &str, options: &Options) -> Result<Region> {
        let code = path::accept_code(code)?;
        self.inner.fetch_as(path::province(code), options).await
    }

    /// Free-text search over provinces. Resolves empty under the static backend.
    pub async fn search(&self, name: &str, options: &Options) -> Result<Vec<Region>> {
        if self.inner.mode(options) == Mode::Static {
            warn!("Province search API is not supported on the static backend");
            return Ok(Vec::new());
        }
        let name = path::accept_name(name)?;
        self.inner.fetch_as(path::search_provinces(name), options).await
    }
}

/// District facade.
pub struct District {
    inner: Arc<ClientInner>,
}

impl District {
    /// List the districts of a province.
    pub async fn find(&self, province_code: &str, options: &Options) -> Result<Vec<Region>> {
        let code = path::accept_code(province_code)?;
        self.inner.fetch_as(path::districts(code), options).await
    }

    /// Fetch a single district by its exact code.
    pub async fn find_by(&self, code: &str, options: &Options) -> Result<Region> {
        let code = path::accept_code(code)?;
        self.inner.fetch_as(path::district(code), options).await
    }

    /// Free-text search over districts. Resolves empty under the static backend.
    pub async fn search(&self, name: &str, options: &Options) -> Result<Vec<Region>> {
        if self.inner.mode(options) == Mode::Static {
            warn!("District search API is not supported on the static backend");
            return Ok(Vec::new());
        }
        let name = path::accept_name(name)?;
        self.inner.fetch_as(path::search_districts(name), options).await
    }
}

/// Subdistrict facade.
pub struct Subdistrict {
    inner: Arc<ClientInner>,
}

impl Subdistrict {
    /// List the subdistricts of a district.
    pub async fn find(&self, district_code: &str, options: &Options) -> Result<Vec<Region>> {
        let code = path::accept_code(district_code)?;
        self.inner.fetch_as(path::subdistricts(code), options).await
    }

    /// Fetch a single subdistrict by its exact code.
    pub async fn find_by(&self, code: &str, options: &Options) -> Result<Region> {
        let code = path::accept_code(code)?;
        self.inner.fetch_as(path::subdistrict(code), options).await
    }

    /// Free-text search over subdistricts. Resolves empty under the static backend.
    pub async fn search(&self, name: &str, options: &Options) -> Result<Vec<Region>> {
        if self.inner.mode(options) == Mode::Static {
            warn!("Subdistrict search API is not supported on the static backend");
            return Ok(Vec::new());
        }
        let name = path::accept_name(name)?;
        self.inner
            .fetch_as(path::search_subdistricts(name), options)
            .await
    }
}

/// Village facade.
pub struct Village {
    inner: Arc<ClientInner>,
}

impl Village {
    /// List the villages of a subdistrict.
    pub async fn find(&self, subdistrict_code: &str, options: &Options) -> Result<Vec<Region>> {
        let code = path::accept_code(subdistrict_code)?;
        self.inner.fetch_as(path::villages(code), options).await
    }

    /// Fetch a single village by its exact code.
    pub async fn find_by(&self, code: &str, options: &Options) -> Result<Region> {
        let code = path::accept_code(code)?;
        self.inner.fetch_as(path::village(code), options).await
    }

    /// Free-text search over villages. Resolves empty under the static backend.
    pub async fn search(&self, name: &str, options: &Options) -> Result<Vec<Region>> {
        if self.inner.mode(options) == Mode::Static {
            warn!("Village search API is not supported on the static backend");
            return Ok(Vec::new());
        }
        let name = path::accept_name(name)?;
        self.inner.fetch_as(path::search_villages(name), options).await
    }
}

/// Client for the Regions of Indonesia dataset.
///
/// Owns the resolved configuration and the dispatch pipeline; the facade
/// fields share both, so middleware state (e.g. the cache) spans all of them.
pub struct RegionsClient {
    inner: Arc<ClientInner>,
    pub province: Province,
    pub district: District,
    pub subdistrict: Subdistrict,
    pub village: Village,
}

impl std::fmt::Debug for RegionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionsClient").finish_non_exhaustive()
    }
}

impl RegionsClient {
    pub fn new(mut options: ClientOptions) -> Result<Self> {
        Url::parse(&options.base_url.dynamic)
            .map_err(|e| RegionsError::Config(format!("invalid dynamic base URL: {e}")))?;
        Url::parse(&options.base_url.static_)
            .map_err(|e| RegionsError::Config(format!("invalid static base URL: {e}")))?;

        let middlewares = options.resolve_middlewares();
        let http = options.resolve_http()?;

        let inner = Arc::new(ClientInner {
            http,
            base_url: options.base_url,
            static_mode: options.static_mode,
            pipeline: Pipeline::new(middlewares),
        });

        Ok(Self {
            province: Province {
                inner: Arc::clone(&inner),
            },
            district: District {
                inner: Arc::clone(&inner),
            },
            subdistrict: Subdistrict {
                inner: Arc::clone(&inner),
            },
            village: Village {
                inner: Arc::clone(&inner),
            },
            inner,
        })
    }

    /// Whether the client defaults to the static backend.
    pub fn is_static(&self) -> bool {
        self.inner.static_mode
    }

    /// Fetch the single record a code refers to, inferring its kind from the
    /// code's segment count (1 = province .. 4 = village). Works on both
    /// backends, since per-record lookups are pre-rendered in the static mirror.
    pub async fn region(&self, code: &str, options: &Options) -> Result<Region> {
        let code = path::accept_code(code)?;
        let level = Level::from_code(code)
            .ok_or_else(|| RegionsError::InvalidCode(code.to_string()))?;
        self.inner.fetch_as(path::by_level(level, code), options).await
    }

    /// Free-text search across all four kinds, grouped by kind. Under the
    /// static backend this resolves to the empty composite without a request.
    pub async fn search(&self, name: &str, options: &Options) -> Result<SearchResult> {
        if self.inner.mode(options) == Mode::Static {
            warn!("Search API is not supported on the static backend");
            return Ok(SearchResult::default());
        }
        let name = path::accept_name(name)?;
        self.inner.fetch_as(path::search(name), options).await
    }
}
