//! Catalog data sources split into submodules.
//!
//! The engine only sees [`CatalogSource`]; the runtime picks the HTTP client
//! or the in-memory fixture at startup.

use futures::future::BoxFuture;

use crate::error::FetchError;
use crate::state::{FetchResult, GoodsQuery};

mod fixture;
mod http;

pub use fixture::StaticCatalog;
pub use http::HttpCatalog;

/// Provider of catalog pages and the category list.
///
/// Futures are `'static` so workers can move them into spawned tasks.
pub trait CatalogSource: Send + Sync {
    /// What: Fetch one page of goods for `query`.
    ///
    /// Inputs:
    /// - `query`: Filter, sort and page parameters
    ///
    /// Output:
    /// - `FetchResult` snapshot, or the `FetchError` that prevented it.
    fn fetch_goods(&self, query: GoodsQuery) -> BoxFuture<'static, Result<FetchResult, FetchError>>;

    /// Fetch the ordered list of category slugs.
    fn fetch_categories(&self) -> BoxFuture<'static, Result<Vec<String>, FetchError>>;

    /// Short human-readable label used in logs.
    fn describe(&self) -> String;
}
