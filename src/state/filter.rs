//! The authoritative filter/sort/page record of a listing session.
//!
//! Every mutator returns a fresh snapshot and applies the field cascades:
//! a category change clears the brand selection and rewinds to page 1; a
//! brand or price change rewinds to page 1; sort and page edits touch only
//! their own field.

use std::collections::BTreeSet;

use serde::Serialize;

use super::types::{GoodsQuery, PriceRange, SortOrder};

/// Separator joining brand identifiers inside a link.
pub const BRAND_DELIMITER: char = '_';

/// Filter, sort and page selection for the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterState {
    category: Option<String>,
    brands: BTreeSet<String>,
    price_range: Option<PriceRange>,
    sort_order: SortOrder,
    #[serde(skip_serializing_if = "is_first_page")]
    page: Page,
}

/// 1-based page number that can never be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
struct Page(u32);

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

/// Serde helper: omit the default page.
const fn is_first_page(page: &Page) -> bool {
    page.0 == 1
}

/// What: Check that a brand identifier survives being joined into a link.
///
/// Inputs:
/// - `brand`: Candidate identifier
///
/// Output: `true` when non-blank and free of [`BRAND_DELIMITER`].
#[must_use]
pub fn is_valid_brand(brand: &str) -> bool {
    !brand.trim().is_empty() && !brand.contains(BRAND_DELIMITER)
}

/// What: Check that a category slug survives being written as a path segment.
///
/// Inputs:
/// - `category`: Candidate slug, already trimmed
///
/// Output: `true` when non-empty and not made only of dots.
///
/// Details:
/// - `.` and `..` are dot segments; URL resolution removes them from the path.
#[must_use]
pub fn is_valid_category(category: &str) -> bool {
    !category.is_empty() && !category.chars().all(|c| c == '.')
}

impl FilterState {
    /// Selected category slug; `None` means the whole shop.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Selected brands.
    #[must_use]
    pub const fn brands(&self) -> &BTreeSet<String> {
        &self.brands
    }

    /// Selected price bounds.
    #[must_use]
    pub const fn price_range(&self) -> Option<PriceRange> {
        self.price_range
    }

    /// Current price ordering.
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Current 1-based page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page.0
    }

    /// What: Select a category (or the whole shop with `None`).
    ///
    /// Inputs:
    /// - `category`: Category slug; blank or dot-only slugs are treated as `None`
    ///
    /// Output: New snapshot with the category set, brands cleared and page reset to 1.
    ///
    /// Details:
    /// - The cascade applies unconditionally, even when re-selecting the current category.
    #[must_use]
    pub fn with_category(&self, category: Option<String>) -> Self {
        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| is_valid_category(c));
        Self {
            category,
            brands: BTreeSet::new(),
            page: Page::default(),
            ..self.clone()
        }
    }

    /// What: Breadcrumb-style reset back to the whole shop.
    ///
    /// Output: Same as `with_category(None)`.
    #[must_use]
    pub fn without_category(&self) -> Self {
        self.with_category(None)
    }

    /// What: Replace the brand selection.
    ///
    /// Inputs:
    /// - `brands`: New selection; identifiers failing [`is_valid_brand`] are dropped
    ///
    /// Output: New snapshot; page resets to 1 only when the selection actually changed.
    #[must_use]
    pub fn with_brands<I, S>(&self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = BTreeSet::new();
        for brand in brands {
            let brand = brand.into();
            if is_valid_brand(&brand) {
                next.insert(brand);
            } else {
                tracing::debug!(brand = %brand, "ignoring unusable brand identifier");
            }
        }
        if next == self.brands {
            return self.clone();
        }
        Self {
            brands: next,
            page: Page::default(),
            ..self.clone()
        }
    }

    /// What: Add a brand to the selection, or remove it when already selected.
    ///
    /// Inputs:
    /// - `brand`: Brand identifier
    ///
    /// Output: New snapshot with page reset to 1; unchanged when `brand` is unusable.
    #[must_use]
    pub fn with_brand_toggled(&self, brand: &str) -> Self {
        if !is_valid_brand(brand) {
            tracing::debug!(brand = %brand, "ignoring unusable brand identifier");
            return self.clone();
        }
        let mut next = self.brands.clone();
        if !next.remove(brand) {
            next.insert(brand.to_string());
        }
        self.with_brands(next)
    }

    /// What: Set or clear the price bounds.
    ///
    /// Inputs:
    /// - `range`: New bounds, `None` to drop the price filter
    ///
    /// Output: New snapshot; page resets to 1 only when the bounds actually changed.
    #[must_use]
    pub fn with_price_range(&self, range: Option<PriceRange>) -> Self {
        if range == self.price_range {
            return self.clone();
        }
        Self {
            price_range: range,
            page: Page::default(),
            ..self.clone()
        }
    }

    /// Set the price ordering. The page is kept.
    #[must_use]
    pub fn with_sort_order(&self, sort_order: SortOrder) -> Self {
        Self {
            sort_order,
            ..self.clone()
        }
    }

    /// Set the page, clamping `0` up to `1`. Nothing else changes.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: Page(page.max(1)),
            ..self.clone()
        }
    }

    /// What: Build the catalog query for this state.
    ///
    /// Inputs:
    /// - `per_page`: Page size requested from the catalog
    ///
    /// Output: `GoodsQuery` carrying every filter field.
    #[must_use]
    pub fn to_query(&self, per_page: u32) -> GoodsQuery {
        GoodsQuery {
            category: self.category.clone(),
            price_range: self.price_range,
            brands: self.brands.clone(),
            sort_order: self.sort_order,
            page: self.page.0,
            per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_state() -> FilterState {
        FilterState::default()
            .with_category(Some("phones".into()))
            .with_brands(["acme", "globex"])
            .with_price_range(Some(PriceRange::new(10, 50)))
            .with_sort_order(SortOrder::Descending)
            .with_page(3)
    }

    #[test]
    /// What: Category change clears brands and rewinds the page
    ///
    /// - Input: State on page 3 with two brands; select "laptops"
    /// - Output: brands empty, page 1, price and sort untouched
    fn category_change_cascades() {
        let before = busy_state();
        let after = before.with_category(Some("laptops".into()));
        assert_eq!(after.category(), Some("laptops"));
        assert!(after.brands().is_empty());
        assert_eq!(after.page(), 1);
        assert_eq!(after.price_range(), before.price_range());
        assert_eq!(after.sort_order(), before.sort_order());
    }

    #[test]
    /// What: Re-selecting the same category still applies the cascade
    ///
    /// - Input: State with brands on page 3; select "phones" again
    /// - Output: brands empty, page 1
    fn same_category_still_cascades() {
        let after = busy_state().with_category(Some("phones".into()));
        assert!(after.brands().is_empty());
        assert_eq!(after.page(), 1);
    }

    #[test]
    /// What: Breadcrumb reset drops the category with the usual cascade
    ///
    /// - Input: Busy state; `without_category`
    /// - Output: category absent, brands empty, page 1
    fn breadcrumb_reset_clears_category() {
        let after = busy_state().without_category();
        assert_eq!(after.category(), None);
        assert!(after.brands().is_empty());
        assert_eq!(after.page(), 1);
    }

    #[test]
    /// What: Brand and price edits rewind the page, sort does not
    ///
    /// - Input: State on page 3; toggle a brand / change price / flip sort
    /// - Output: page 1, page 1, page 3
    fn page_reset_rules() {
        let base = busy_state();
        assert_eq!(base.with_brand_toggled("initech").page(), 1);
        assert_eq!(
            base.with_price_range(Some(PriceRange::new(0, 20))).page(),
            1
        );
        assert_eq!(base.with_price_range(None).page(), 1);
        assert_eq!(base.with_sort_order(SortOrder::Ascending).page(), 3);
    }

    #[test]
    /// What: Setting a field to its current value changes nothing
    ///
    /// - Input: Same brand set and same price range re-applied on page 3
    /// - Output: Equal snapshot, page still 3
    fn unchanged_values_do_not_cascade() {
        let base = busy_state();
        assert_eq!(base.with_brands(["globex", "acme"]), base);
        assert_eq!(base.with_price_range(Some(PriceRange::new(50, 10))), base);
    }

    #[test]
    /// What: Toggling adds then removes a brand
    ///
    /// - Input: Empty selection; toggle "acme" twice
    /// - Output: {"acme"} then {}
    fn toggle_brand_adds_and_removes() {
        let once = FilterState::default().with_brand_toggled("acme");
        assert!(once.brands().contains("acme"));
        let twice = once.with_brand_toggled("acme");
        assert!(twice.brands().is_empty());
    }

    #[test]
    /// What: Brands that cannot round-trip through a link are rejected
    ///
    /// - Input: "acme_globex" and "  "
    /// - Output: Selection unchanged
    fn delimiter_brands_rejected() {
        let base = FilterState::default();
        assert_eq!(base.with_brand_toggled("acme_globex"), base);
        assert!(base.with_brands(["  ", "a_b"]).brands().is_empty());
    }

    #[test]
    /// What: Page zero clamps to one and blank category means none
    ///
    /// - Input: `with_page(0)`, `with_category(Some("  "))`
    /// - Output: page 1, category None
    fn clamps_and_blank_category() {
        assert_eq!(FilterState::default().with_page(0).page(), 1);
        assert_eq!(
            FilterState::default()
                .with_category(Some("  ".into()))
                .category(),
            None
        );
    }

    #[test]
    /// What: Dot-only slugs cannot become a category
    ///
    /// - Input: ".", "..", " ... ", and "v1.2"
    /// - Output: None for the dot-only slugs; "v1.2" kept
    fn dot_only_category_is_rejected() {
        for slug in [".", "..", " ... "] {
            assert_eq!(
                FilterState::default()
                    .with_category(Some(slug.into()))
                    .category(),
                None,
                "slug {slug:?}"
            );
        }
        assert_eq!(
            FilterState::default()
                .with_category(Some("v1.2".into()))
                .category(),
            Some("v1.2")
        );
        assert!(!is_valid_category(".."));
        assert!(is_valid_category(".hidden"));
    }

    #[test]
    /// What: Query building carries every field
    ///
    /// - Input: Busy state, 12 per page
    /// - Output: Matching `GoodsQuery`
    fn to_query_carries_fields() {
        let q = busy_state().to_query(12);
        assert_eq!(q.category.as_deref(), Some("phones"));
        assert_eq!(q.brands.len(), 2);
        assert_eq!(q.price_range, Some(PriceRange::new(10, 50)));
        assert_eq!(q.sort_order, SortOrder::Descending);
        assert_eq!(q.page, 3);
        assert_eq!(q.per_page, 12);
    }
}
