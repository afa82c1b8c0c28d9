//! Shareable addresses and their navigation history.

mod history;
mod location;

pub use history::{History, HistoryMode};
pub use location::{Location, QueryString, SHOP_ROOT};
