//! Catalog session state: the filter record, its value types, and the
//! event-loop-owned [`AppState`].

pub mod app_state;
pub mod filter;
pub mod types;

pub use app_state::{AppState, DEFAULT_PER_PAGE, SessionOptions};
pub use filter::FilterState;
pub use types::{
    CatalogItem, FetchResult, Focus, GoodsQuery, GoodsRequest, GoodsResponse, PriceRange,
    RequestToken, SortOrder,
};
