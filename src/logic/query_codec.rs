//! Two-way mapping between [`FilterState`] and a shareable link.
//!
//! Encoding is deterministic and omits default-valued fields. Decoding is
//! tolerant: unknown keys are skipped, field order is irrelevant, and any
//! value that cannot be interpreted leaves its field at the default.

use crate::error::DecodeError;
use crate::route::{Location, QueryString};
use crate::state::filter::{BRAND_DELIMITER, is_valid_brand};
use crate::state::{FilterState, PriceRange, SortOrder};

/// Query key for the 1-based page.
pub const KEY_PAGE: &str = "page";
/// Query key for the delimiter-joined brand list.
pub const KEY_BRAND: &str = "brand";
/// Query key for the lower price bound.
pub const KEY_PRICE_FROM: &str = "priceFrom";
/// Query key for the upper price bound.
pub const KEY_PRICE_TO: &str = "priceTo";
/// Query key for the price ordering (only emitted for descending).
pub const KEY_SORT: &str = "sort";

/// What: Serialize the non-route fields of a filter state.
///
/// Inputs:
/// - `state`: Filter state to encode
///
/// Output:
/// - `QueryString` with keys in the order `page`, `brand`, `priceFrom`, `priceTo`, `sort`.
///
/// Details:
/// - `page` only when not 1, `brand` only when non-empty, both price keys or neither,
///   `sort` only when descending. Brands are joined in sorted order.
#[must_use]
pub fn encode(state: &FilterState) -> QueryString {
    let mut query = QueryString::default();
    if state.page() != 1 {
        query.push(KEY_PAGE, state.page().to_string());
    }
    if !state.brands().is_empty() {
        let mut joined = String::new();
        for (i, brand) in state.brands().iter().enumerate() {
            if i > 0 {
                joined.push(BRAND_DELIMITER);
            }
            joined.push_str(brand);
        }
        query.push(KEY_BRAND, joined);
    }
    if let Some(range) = state.price_range() {
        query.push(KEY_PRICE_FROM, range.from().to_string());
        query.push(KEY_PRICE_TO, range.to().to_string());
    }
    if state.sort_order() != SortOrder::default() {
        query.push(KEY_SORT, state.sort_order().as_query_value());
    }
    query
}

/// What: Decode a query string into a filter state, logging anything ignored.
///
/// Inputs:
/// - `query`: Parsed query pairs
///
/// Output:
/// - `FilterState` with category absent; never fails.
#[must_use]
pub fn decode(query: &QueryString) -> FilterState {
    let (state, issues) = decode_reporting(query);
    for issue in issues {
        tracing::debug!(error = %issue, "ignored query parameter");
    }
    state
}

/// What: Decode a query string and return the problems that were recovered from.
///
/// Inputs:
/// - `query`: Parsed query pairs
///
/// Output:
/// - The decoded state (category absent) and one `DecodeError` per ignored value.
///
/// Details:
/// - `page` must be an integer ≥ 1.
/// - A price range needs both bounds to parse; reversed bounds are put in order.
/// - Empty brand segments are skipped.
#[must_use]
pub fn decode_reporting(query: &QueryString) -> (FilterState, Vec<DecodeError>) {
    let mut issues = Vec::new();
    let mut state = FilterState::default();

    if let Some(raw) = query.get(KEY_BRAND) {
        let mut brands = Vec::new();
        for brand in raw.split(BRAND_DELIMITER).filter(|b| !b.is_empty()) {
            if is_valid_brand(brand) {
                brands.push(brand.to_string());
            } else {
                issues.push(DecodeError::InvalidBrand(brand.to_string()));
            }
        }
        state = state.with_brands(brands);
    }

    match (query.get(KEY_PRICE_FROM), query.get(KEY_PRICE_TO)) {
        (Some(from), Some(to)) => {
            match (parse_bound(KEY_PRICE_FROM, from), parse_bound(KEY_PRICE_TO, to)) {
                (Ok(from), Ok(to)) => {
                    state = state.with_price_range(Some(PriceRange::new(from, to)));
                }
                (from, to) => issues.extend(from.err().into_iter().chain(to.err())),
            }
        }
        (None, None) => {}
        _ => issues.push(DecodeError::IncompletePriceRange),
    }

    if let Some(raw) = query.get(KEY_SORT) {
        match SortOrder::from_query_value(raw) {
            Some(order) => state = state.with_sort_order(order),
            None => issues.push(DecodeError::InvalidSortOrder(raw.to_string())),
        }
    }

    // Page last: the brand and price setters rewind it.
    if let Some(raw) = query.get(KEY_PAGE) {
        match raw.trim().parse::<u32>() {
            Ok(page) if page >= 1 => state = state.with_page(page),
            _ => issues.push(DecodeError::InvalidInteger {
                key: KEY_PAGE.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    (state, issues)
}

/// What: Parse one price bound.
///
/// Inputs:
/// - `key`: Query key (for the error)
/// - `raw`: Raw value
///
/// Output: Parsed bound or `DecodeError::InvalidInteger`.
fn parse_bound(key: &str, raw: &str) -> Result<u64, DecodeError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| DecodeError::InvalidInteger {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

/// What: Encode the full state, route segment included.
///
/// Inputs:
/// - `state`: Filter state
///
/// Output: `Location` whose path carries the category and whose query carries the rest.
#[must_use]
pub fn encode_location(state: &FilterState) -> Location {
    Location {
        category: state.category().map(ToString::to_string),
        query: encode(state),
    }
}

/// What: Decode a full location into a filter state.
///
/// Inputs:
/// - `location`: Parsed address
///
/// Output: `FilterState` with the route category and the decoded query fields.
///
/// Details:
/// - The category is applied first so that its cascade does not wipe the decoded brands or page.
#[must_use]
pub fn decode_location(location: &Location) -> FilterState {
    let fields = decode(&location.query);
    FilterState::default()
        .with_category(location.category.clone())
        .with_brands(fields.brands().iter().cloned())
        .with_price_range(fields.price_range())
        .with_sort_order(fields.sort_order())
        .with_page(fields.page())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(raw: &str) -> QueryString {
        QueryString::parse(raw)
    }

    #[test]
    /// What: Decode the documented example link
    ///
    /// - Input: `?page=2&brand=acme_globex&priceFrom=10&priceTo=50`
    /// - Output: page 2, brands {acme, globex}, price 10..=50, no category, ascending
    fn decodes_example_link() {
        let state = decode(&q("?page=2&brand=acme_globex&priceFrom=10&priceTo=50"));
        assert_eq!(state.page(), 2);
        assert_eq!(
            state.brands().iter().map(String::as_str).collect::<Vec<_>>(),
            ["acme", "globex"]
        );
        assert_eq!(state.price_range(), Some(PriceRange::new(10, 50)));
        assert_eq!(state.category(), None);
        assert_eq!(state.sort_order(), SortOrder::Ascending);
    }

    #[test]
    /// What: Defaults produce an empty query
    ///
    /// - Input: `FilterState::default()`
    /// - Output: No pairs
    fn default_state_encodes_empty() {
        assert!(encode(&FilterState::default()).is_empty());
    }

    #[test]
    /// What: Encoding is deterministic regardless of brand insertion order
    ///
    /// - Input: Same brands selected in opposite orders
    /// - Output: Identical query text
    fn encoding_is_order_independent() {
        let a = FilterState::default().with_brands(["globex", "acme"]);
        let b = FilterState::default().with_brands(["acme", "globex"]);
        assert_eq!(encode(&a).to_string(), "brand=acme_globex");
        assert_eq!(encode(&a), encode(&b));
    }

    #[test]
    /// What: Busy and sparse states survive encode/decode
    ///
    /// - Input: A state with every field set, and one with only a descending sort
    /// - Output: `decode_location(encode_location(s)) == s`
    fn round_trips_reachable_states() {
        let busy = FilterState::default()
            .with_category(Some("phones".into()))
            .with_brands(["acme", "globex"])
            .with_price_range(Some(PriceRange::new(10, 50)))
            .with_sort_order(SortOrder::Descending)
            .with_page(4);
        let sparse = FilterState::default().with_sort_order(SortOrder::Descending);
        for state in [busy, sparse] {
            let link = encode_location(&state).to_string();
            let reparsed = Location::parse(&link).expect("encoded link parses");
            assert_eq!(decode_location(&reparsed), state, "link {link}");
        }
    }

    #[test]
    /// What: Awkward categories, brands and extreme bounds survive encode/decode
    ///
    /// - Input: Categories with dots, `/`, `?`, `%`, `#`, spaces and non-ASCII, crossed with
    ///   brands containing `&`, `+`, `=` and non-ASCII, at `u64::MAX` price and `u32::MAX` page
    /// - Output: Every state round-trips; dot-only slugs never become a category
    fn round_trips_edge_values() {
        let categories = [
            "..", ".", "a/b", "é", "a?b", "shop", "100%", "a#b", "home garden", "v1.2",
        ];
        let brands = ["a&b", "c+d", "ü", "x=y", "50%"];
        for category in categories {
            for brand in brands {
                let state = FilterState::default()
                    .with_category(Some(category.into()))
                    .with_brands([brand, "acme"])
                    .with_price_range(Some(PriceRange::new(0, u64::MAX)))
                    .with_sort_order(SortOrder::Descending)
                    .with_page(u32::MAX);
                let link = encode_location(&state).to_string();
                let reparsed = Location::parse(&link).expect("encoded link parses");
                assert_eq!(decode_location(&reparsed), state, "link {link}");
            }
        }
        let dots = FilterState::default().with_category(Some("..".into()));
        assert_eq!(encode_location(&dots).to_string(), "/shop");
    }

    #[test]
    /// What: Field order does not matter and unknown keys are ignored
    ///
    /// - Input: Keys shuffled plus `utm_source`
    /// - Output: Same state as the canonical order
    fn ignores_order_and_unknown_keys() {
        let shuffled = decode(&q("priceTo=50&utm_source=mail&page=2&priceFrom=10"));
        let canonical = decode(&q("page=2&priceFrom=10&priceTo=50"));
        assert_eq!(shuffled, canonical);
        assert_eq!(shuffled.page(), 2);
    }

    #[test]
    /// What: Malformed values fall back to defaults and are reported
    ///
    /// - Input: `page=abc`, `priceFrom` without `priceTo`, `sort=sideways`
    /// - Output: Default state with three decode errors
    fn malformed_values_degrade_to_defaults() {
        let (state, issues) = decode_reporting(&q("page=abc&priceFrom=10&sort=sideways"));
        assert_eq!(state, FilterState::default());
        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&DecodeError::IncompletePriceRange));
        assert!(issues.contains(&DecodeError::InvalidSortOrder("sideways".into())));
    }

    #[test]
    /// What: Zero page and non-numeric price bounds are rejected individually
    ///
    /// - Input: `page=0&priceFrom=x&priceTo=20&brand=acme`
    /// - Output: page 1, no price range, brand kept
    fn partial_recovery_keeps_good_fields() {
        let (state, issues) = decode_reporting(&q("page=0&priceFrom=x&priceTo=20&brand=acme"));
        assert_eq!(state.page(), 1);
        assert_eq!(state.price_range(), None);
        assert!(state.brands().contains("acme"));
        assert_eq!(issues.len(), 2);
    }

    #[test]
    /// What: Reversed price bounds are normalized, empty brand segments skipped
    ///
    /// - Input: `priceFrom=50&priceTo=10&brand=_acme__`
    /// - Output: Range 10..=50, brands {acme}
    fn normalizes_lenient_inputs() {
        let state = decode(&q("priceFrom=50&priceTo=10&brand=_acme__"));
        assert_eq!(state.price_range(), Some(PriceRange::new(10, 50)));
        assert_eq!(state.brands().len(), 1);
    }

    #[test]
    /// What: Switching category on page 3 drops the `page` key from the link
    ///
    /// - Input: `/shop/phones?page=3` then category "laptops"
    /// - Output: `/shop/laptops`
    fn category_switch_rewrites_link() {
        let start = decode_location(&Location::parse("/shop/phones?page=3").expect("link"));
        assert_eq!(start.page(), 3);
        let next = start.with_category(Some("laptops".into()));
        assert_eq!(encode_location(&next).to_string(), "/shop/laptops");
    }
}
