//! Derivation of the rendered listing from session state.
//!
//! Rendering code never inspects `AppState` directly for listing content;
//! it draws a [`CatalogView`]. That keeps phase handling (placeholders,
//! banners, disabled controls) testable without a terminal.

use crate::logic::fetch::FetchStatus;
use crate::logic::viewport::LayoutDecision;
use crate::state::{AppState, CatalogItem, PriceRange, SortOrder};
use crate::util::capitalize;

/// Session phase as seen by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been issued yet.
    Initializing,
    /// The current request is pending; content is replaced by placeholders.
    Loading,
    /// The current request resolved.
    Loaded,
    /// The current request failed; prior content, if any, stays visible.
    Failed,
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Card<'a> {
    /// Skeleton shown while loading.
    Placeholder,
    /// A real item.
    Item(&'a CatalogItem),
}

/// Pager state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current 1-based page.
    pub page: u32,
    /// Number of pages, when a total is known.
    pub last_page: Option<u32>,
    /// Matching items across all pages, when known.
    pub total: Option<u64>,
    /// Whether a previous page exists.
    pub can_prev: bool,
    /// Whether a next page may exist.
    pub can_next: bool,
}

/// Row of the category selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// Slug; `None` for the whole shop.
    pub slug: Option<String>,
    /// Display label.
    pub label: String,
    /// Whether this is the active category.
    pub selected: bool,
}

/// Row of the brand check list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandOption {
    /// Brand identifier.
    pub name: String,
    /// Whether it is part of the current filter.
    pub selected: bool,
}

/// Price editor bounds and selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceControl {
    /// Lowest selectable price.
    pub min: u64,
    /// Highest selectable price (`maximal_price` of the displayed result).
    pub max: u64,
    /// Applied filter.
    pub applied: Option<PriceRange>,
    /// Range being edited, not yet applied.
    pub draft: Option<PriceRange>,
}

/// Filter panel content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControls {
    /// Category selector rows; the first is always the whole shop.
    pub categories: Vec<CategoryOption>,
    /// Brand list, `None` while bounds are not loaded.
    pub brands: Option<Vec<BrandOption>>,
    /// Price editor, `None` while bounds are not loaded.
    pub price: Option<PriceControl>,
    /// Current ordering.
    pub sort: SortOrder,
}

/// Everything the renderer draws for the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<'a> {
    /// Session phase.
    pub phase: Phase,
    /// Page heading.
    pub title: String,
    /// Home / Shop / Category trail.
    pub breadcrumbs: Vec<String>,
    /// Grid cells in display order.
    pub cards: Vec<Card<'a>>,
    /// Pager.
    pub pagination: Pagination,
    /// Filter panel.
    pub controls: FilterControls,
    /// Viewport-driven layout.
    pub layout: LayoutDecision,
    /// Non-fatal error text.
    pub banner: Option<String>,
    /// Shareable link of the current state.
    pub link: String,
}

/// What: Derive the listing for the current session state.
///
/// Inputs:
/// - `app`: Session state
///
/// Output:
/// - `CatalogView` borrowing items from the displayed result.
///
/// Details:
/// - Cards are `per_page` placeholders unless a result is displayed.
/// - Brand and price controls take their bounds from the displayed result only, and only
///   when that result was fetched for the current category.
/// - The pager uses the last known total so page changes stay possible while loading.
#[must_use]
pub fn derive_view(app: &AppState) -> CatalogView<'_> {
    let phase = match app.fetch.status() {
        FetchStatus::Idle => Phase::Initializing,
        FetchStatus::Pending => Phase::Loading,
        FetchStatus::Loaded => Phase::Loaded,
        FetchStatus::Failed(_) => Phase::Failed,
    };
    let displayed = app.fetch.displayed();
    let cards = displayed.map_or_else(
        || vec![Card::Placeholder; app.options.per_page as usize],
        |r| r.items.iter().map(Card::Item).collect(),
    );

    let banner = match app.fetch.status() {
        FetchStatus::Failed(err) => Some(format!("Could not load the catalog: {err}. Press r to retry.")),
        _ => app
            .fetch
            .categories_error()
            .map(|err| format!("Categories unavailable: {err}. Press r to retry.")),
    };

    let category = app.filter.category();
    let title = category.map_or_else(|| "Shop".to_string(), capitalize);
    let mut breadcrumbs = vec!["Home".to_string(), "Shop".to_string()];
    if let Some(c) = category {
        breadcrumbs.push(capitalize(c));
    }

    CatalogView {
        phase,
        title,
        breadcrumbs,
        cards,
        pagination: pagination(app),
        controls: controls(app),
        layout: app.layout(),
        banner,
        link: app.link(),
    }
}

/// Pager state for the current filter and the last known total.
#[must_use]
pub fn pagination(app: &AppState) -> Pagination {
    let page = app.filter.page();
    let total = app.fetch.latest().map(|r| r.total);
    let per_page = u64::from(app.options.per_page.max(1));
    let last_page = total.map(|t| u32::try_from(t.div_ceil(per_page).max(1)).unwrap_or(u32::MAX));
    Pagination {
        page,
        last_page,
        total,
        can_prev: page > 1,
        can_next: last_page.is_none_or(|last| page < last),
    }
}

fn controls(app: &AppState) -> FilterControls {
    let current = app.filter.category();
    let mut categories = vec![CategoryOption {
        slug: None,
        label: "All".to_string(),
        selected: current.is_none(),
    }];
    categories.extend(app.fetch.categories().unwrap_or_default().iter().map(|slug| {
        CategoryOption {
            slug: Some(slug.clone()),
            label: capitalize(slug),
            selected: current == Some(slug.as_str()),
        }
    }));
    if let Some(c) = current
        && !categories.iter().any(|o| o.selected)
    {
        categories.push(CategoryOption {
            slug: Some(c.to_string()),
            label: capitalize(c),
            selected: true,
        });
    }

    let bounds = app.fetch.bounds_for(current);
    let brands = bounds.map(|r| {
        let selected = app.filter.brands();
        let mut rows: Vec<BrandOption> = r
            .brands
            .iter()
            .map(|name| BrandOption {
                name: name.clone(),
                selected: selected.contains(name),
            })
            .collect();
        for name in selected {
            if !r.brands.contains(name) {
                rows.push(BrandOption {
                    name: name.clone(),
                    selected: true,
                });
            }
        }
        rows
    });
    let price = bounds.map(|r| PriceControl {
        min: 0,
        max: r.maximal_price,
        applied: app.filter.price_range(),
        draft: app.price_draft,
    });

    FilterControls {
        categories,
        brands,
        price,
        sort: app.filter.sort_order(),
    }
}
