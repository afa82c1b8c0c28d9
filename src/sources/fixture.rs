//! In-memory catalog used for offline browsing and tests.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use serde::Deserialize;

use crate::error::FetchError;
use crate::state::{CatalogItem, FetchResult, GoodsQuery, SortOrder};

use super::CatalogSource;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Built-in demo rows: id, name, brand, category, price, old price, rating.
const DEMO_ROWS: &[(&str, &str, &str, &str, u64, Option<u64>, f32)] = &[
    ("ph-01", "Nova 12", "acme", "phones", 499, Some(549), 4.4),
    ("ph-02", "Nova 12 Pro", "acme", "phones", 799, None, 4.6),
    ("ph-03", "Orbit S", "globex", "phones", 349, None, 4.1),
    ("ph-04", "Orbit Max", "globex", "phones", 999, Some(1099), 4.7),
    ("ph-05", "Pulse Mini", "initech", "phones", 229, None, 3.9),
    ("ph-06", "Pulse", "initech", "phones", 399, Some(429), 4.2),
    ("ph-07", "Zen Fold", "umbrella", "phones", 1299, None, 4.3),
    ("ph-08", "Zen Lite", "umbrella", "phones", 189, None, 3.6),
    ("lp-01", "Carbon 14", "acme", "laptops", 1199, Some(1299), 4.5),
    ("lp-02", "Carbon 16", "acme", "laptops", 1499, None, 4.6),
    ("lp-03", "Vector Air", "globex", "laptops", 899, None, 4.0),
    ("lp-04", "Vector Studio", "globex", "laptops", 2199, Some(2399), 4.8),
    ("lp-05", "Stack 13", "initech", "laptops", 649, None, 3.8),
    ("lp-06", "Stack 15", "initech", "laptops", 749, Some(799), 4.1),
    ("hp-01", "Hush", "acme", "headphones", 199, None, 4.3),
    ("hp-02", "Hush Pro", "acme", "headphones", 299, Some(349), 4.5),
    ("hp-03", "Bass Buds", "soylent", "headphones", 79, None, 3.7),
    ("hp-04", "Bass Over", "soylent", "headphones", 129, Some(149), 4.0),
    ("hp-05", "Echo", "globex", "headphones", 159, None, 4.2),
    ("wt-01", "Tick", "initech", "watches", 149, None, 3.9),
    ("wt-02", "Tick Sport", "initech", "watches", 219, Some(249), 4.2),
    ("wt-03", "Chrono", "umbrella", "watches", 399, None, 4.6),
    ("wt-04", "Chrono Steel", "umbrella", "watches", 549, Some(599), 4.7),
    ("wt-05", "Band", "soylent", "watches", 59, None, 3.5),
];

/// On-disk fixture layout.
#[derive(Deserialize)]
struct FixtureFile {
    #[serde(default)]
    categories: Option<Vec<String>>,
    items: Vec<CatalogItem>,
}

#[derive(Debug)]
struct Inventory {
    categories: Vec<String>,
    items: Vec<CatalogItem>,
}

/// Catalog served from memory, optionally with artificial latency.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    inventory: Arc<Inventory>,
    latency: Duration,
    label: String,
}

impl StaticCatalog {
    /// What: Build a catalog from items.
    ///
    /// Inputs:
    /// - `items`: Full inventory
    ///
    /// Output:
    /// - `StaticCatalog` whose categories are listed in first-seen order.
    #[must_use]
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for item in &items {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        Self::with_categories(categories, items, "memory")
    }

    fn with_categories(categories: Vec<String>, items: Vec<CatalogItem>, label: &str) -> Self {
        Self {
            inventory: Arc::new(Inventory { categories, items }),
            latency: Duration::ZERO,
            label: label.to_string(),
        }
    }

    /// Built-in demo shop.
    #[must_use]
    pub fn demo() -> Self {
        let items = DEMO_ROWS
            .iter()
            .map(
                |&(id, name, brand, category, price, old_price, rate)| CatalogItem {
                    id: id.to_string(),
                    name: name.to_string(),
                    brand: brand.to_string(),
                    category: category.to_string(),
                    price,
                    old_price,
                    rate: Some(rate),
                    image: None,
                },
            )
            .collect();
        let mut catalog = Self::new(items);
        catalog.label = "demo".to_string();
        catalog
    }

    /// What: Load a fixture from a JSON file.
    ///
    /// Inputs:
    /// - `path`: File with `{"items": [...], "categories": [...]?}`
    ///
    /// Output:
    /// - `StaticCatalog`; categories default to first-seen order of the items.
    ///
    /// # Errors
    /// - Returns `Err` when the file cannot be read or is not valid fixture JSON
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let file: FixtureFile = serde_json::from_str(&text)?;
        let label = path.display().to_string();
        let mut catalog = match file.categories {
            Some(categories) => Self::with_categories(categories, file.items, &label),
            None => Self::new(file.items),
        };
        catalog.label = label;
        tracing::info!(
            path = %path.display(),
            items = catalog.inventory.items.len(),
            "loaded catalog fixture"
        );
        Ok(catalog)
    }

    /// Delay every response by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Category slugs in display order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.inventory.categories
    }

    /// What: Answer a goods query against the inventory.
    ///
    /// Inputs:
    /// - `query`: Filter, sort and page parameters
    ///
    /// Output:
    /// - `FetchResult` for the requested page.
    ///
    /// Details:
    /// - `maximal_price` and `brands` cover the whole category, ignoring brand and price filters.
    /// - Equal prices are ordered by id so paging is stable.
    /// - An unknown category yields an empty result, not an error.
    #[must_use]
    pub fn query(&self, query: &GoodsQuery) -> FetchResult {
        let scope: Vec<&CatalogItem> = self
            .inventory
            .items
            .iter()
            .filter(|it| query.category.as_deref().is_none_or(|c| it.category == c))
            .collect();
        let maximal_price = scope.iter().map(|it| it.price).max().unwrap_or(0);
        let mut brands: Vec<String> = scope.iter().map(|it| it.brand.clone()).collect();
        brands.sort();
        brands.dedup();

        let mut matching: Vec<&CatalogItem> = scope
            .into_iter()
            .filter(|it| query.brands.is_empty() || query.brands.contains(&it.brand))
            .filter(|it| query.price_range.is_none_or(|r| r.contains(it.price)))
            .collect();
        matching.sort_by(|a, b| {
            let by_price = match query.sort_order {
                SortOrder::Ascending => a.price.cmp(&b.price),
                SortOrder::Descending => b.price.cmp(&a.price),
            };
            match by_price {
                Ordering::Equal => a.id.cmp(&b.id),
                other => other,
            }
        });

        let per_page = query.per_page.max(1) as usize;
        let skip = (query.page.max(1) as usize - 1).saturating_mul(per_page);
        FetchResult {
            total: matching.len() as u64,
            items: matching
                .into_iter()
                .skip(skip)
                .take(per_page)
                .cloned()
                .collect(),
            maximal_price,
            brands,
        }
    }
}

impl CatalogSource for StaticCatalog {
    fn fetch_goods(
        &self,
        query: GoodsQuery,
    ) -> BoxFuture<'static, std::result::Result<FetchResult, FetchError>> {
        let this = self.clone();
        Box::pin(async move {
            if !this.latency.is_zero() {
                tokio::time::sleep(this.latency).await;
            }
            Ok(this.query(&query))
        })
    }

    fn fetch_categories(&self) -> BoxFuture<'static, std::result::Result<Vec<String>, FetchError>> {
        let categories = self.inventory.categories.clone();
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            Ok(categories)
        })
    }

    fn describe(&self) -> String {
        format!("fixture {}", self.label)
    }
}
