//! Client library for the Regions of Indonesia dataset: provinces, districts,
//! subdistricts, and villages, served either by the dynamic query API or by a
//! statically hosted mirror of pre-rendered JSON files.
//!
//! Every lookup runs through a configurable middleware pipeline (logging and
//! caching by default) and can be cancelled cooperatively:
//!
//! ```no_run
//! use regions_of_indonesia::{ClientOptions, Options, RegionsClient};
//!
//! # async fn demo() -> regions_of_indonesia::Result<()> {
//! let client = RegionsClient::new(ClientOptions::default())?;
//!
//! let provinces = client.province.find(&Options::default()).await?;
//! let aceh = client.province.find_by("11", &Options::default()).await?;
//! let village = client.region("11.01.01.2001", &Options::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod abort;
pub mod cache;
pub mod client;
pub mod code;
pub mod error;
mod http;
pub mod middleware;
pub mod path;
pub mod pipeline;
pub mod types;

pub use abort::{AbortController, AbortSignal};
pub use cache::{CacheDriver, MemoryDriver};
pub use client::{
    BaseUrl, ClientOptions, District, Options, Province, RegionsClient, Subdistrict, Village,
    DEFAULT_DYNAMIC_BASE_URL, DEFAULT_STATIC_BASE_URL,
};
pub use code::Level;
pub use error::{RegionsError, Result};
pub use middleware::{
    CacheMiddleware, Context, DelayMiddleware, Fallback, LogMiddleware, Middleware, Next,
};
pub use pipeline::Pipeline;
pub use types::{Region, SearchResult};
