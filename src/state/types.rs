//! Core value types used by the catalog state.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Price ordering for the item grid. The sort key is always the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Cheapest first.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Most expensive first.
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// What: Wire value used in links and catalog requests.
    ///
    /// Output: `"asc"` or `"desc"`.
    #[must_use]
    pub const fn as_query_value(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// What: Parse a wire value (case-insensitive).
    ///
    /// Inputs:
    /// - `s`: Raw value from a link or config file
    ///
    /// Output: `Some(SortOrder)` when recognized; `None` otherwise.
    #[must_use]
    pub fn from_query_value(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    /// Human-readable label for the sort menu.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ascending => "Price: low to high",
            Self::Descending => "Price: high to low",
        }
    }

    /// The other order.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Inclusive price bounds. Construction keeps `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PriceRange {
    from: u64,
    to: u64,
}

impl PriceRange {
    /// What: Build a range from two bounds given in either order.
    ///
    /// Inputs:
    /// - `a`, `b`: Bounds; the smaller becomes the lower bound
    ///
    /// Output: Normalized `PriceRange`.
    #[must_use]
    pub const fn new(a: u64, b: u64) -> Self {
        if a <= b {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub const fn from(&self) -> u64 {
        self.from
    }

    /// Upper bound (inclusive).
    #[must_use]
    pub const fn to(&self) -> u64 {
        self.to
    }

    /// Whether `price` lies within the bounds.
    #[must_use]
    pub const fn contains(&self, price: u64) -> bool {
        price >= self.from && price <= self.to
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.from, self.to)
    }
}

/// Opaque generation counter identifying one goods request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Token following `self`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// The first token ever minted in a session.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One purchasable item as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Stable item identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Brand identifier.
    pub brand: String,
    /// Category slug the item belongs to.
    pub category: String,
    /// Current price in whole currency units.
    pub price: u64,
    /// Price before a discount, when the item is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<u64>,
    /// Average rating on a 0–5 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f32>,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Immutable snapshot of one completed goods query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    /// Items on the requested page, in display order.
    pub items: Vec<CatalogItem>,
    /// Number of items matching the filters across all pages.
    pub total: u64,
    /// Highest price in the unfiltered category; bounds the price control.
    pub maximal_price: u64,
    /// Brands available in the current category.
    pub brands: Vec<String>,
}

/// Parameters of one goods request, as handed to a catalog source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoodsQuery {
    /// Category slug, or `None` for the whole shop.
    pub category: Option<String>,
    /// Inclusive price bounds.
    pub price_range: Option<PriceRange>,
    /// Brand filter; empty means any brand.
    pub brands: BTreeSet<String>,
    /// Price ordering.
    pub sort_order: SortOrder,
    /// 1-based page.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

/// A goods query tagged with the token minted for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoodsRequest {
    /// Token used to recognize the response.
    pub token: RequestToken,
    /// The query to run.
    pub query: GoodsQuery,
}

/// Outcome of a [`GoodsRequest`], echoing its token.
#[derive(Debug, Clone)]
pub struct GoodsResponse {
    /// Echoed token from the originating request.
    pub token: RequestToken,
    /// Result or failure of the call.
    pub result: Result<FetchResult, FetchError>,
}

/// Which control receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Category selector.
    Categories,
    /// Brand check list.
    Brands,
    /// Price range editor.
    Price,
    /// Item grid and pagination.
    #[default]
    Grid,
}

impl Focus {
    /// Next control in tab order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Categories => Self::Brands,
            Self::Brands => Self::Price,
            Self::Price => Self::Grid,
            Self::Grid => Self::Categories,
        }
    }

    /// Previous control in tab order.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Categories => Self::Grid,
            Self::Brands => Self::Categories,
            Self::Price => Self::Brands,
            Self::Grid => Self::Price,
        }
    }
}
