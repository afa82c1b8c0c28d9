//! Shareable link behavior across the public API: decoding entry links,
//! canonical encoding, and history navigation.

use shopfront::logic::intents::{IntentOutcome, UserIntent, apply_intent, bootstrap};
use shopfront::logic::{decode_location, encode_location};
use shopfront::route::Location;
use shopfront::state::{AppState, PriceRange, SessionOptions, SortOrder};

fn session(link: &str) -> AppState {
    AppState::from_link(link, SessionOptions::default())
}

#[test]
/// What: A full link decodes into every filter field and encodes back unchanged
///
/// - Input: `/shop/phones?page=2&brand=acme_globex&priceFrom=10&priceTo=50&sort=desc`
/// - Output: Matching fields; canonical link identical to the input
fn full_link_is_stable() {
    let link = "/shop/phones?page=2&brand=acme_globex&priceFrom=10&priceTo=50&sort=desc";
    let app = session(link);
    assert_eq!(app.filter.category(), Some("phones"));
    assert_eq!(app.filter.page(), 2);
    assert_eq!(app.filter.brands().len(), 2);
    assert_eq!(app.filter.price_range(), Some(PriceRange::new(10, 50)));
    assert_eq!(app.filter.sort_order(), SortOrder::Descending);
    assert_eq!(app.link(), link);
}

#[test]
/// What: Brands are emitted in a stable order regardless of input order
///
/// - Input: `?brand=globex_acme`
/// - Output: `/shop?brand=acme_globex`
fn brand_order_is_canonical() {
    assert_eq!(session("/shop?brand=globex_acme").link(), "/shop?brand=acme_globex");
}

#[test]
/// What: Broken pieces of an entry link are dropped instead of failing
///
/// - Input: Non-numeric page, half a price range, unknown keys, absolute URL
/// - Output: Defaults for the broken fields; the rest survives
fn malformed_pieces_fall_back() {
    let app = session("https://shop.example/shop/laptops?page=abc&priceFrom=100&ref=mail&brand=acme");
    assert_eq!(app.filter.page(), 1);
    assert_eq!(app.filter.price_range(), None);
    assert_eq!(app.link(), "/shop/laptops?brand=acme");
}

#[test]
/// What: Reversed price bounds are normalized
///
/// - Input: `?priceFrom=90&priceTo=10`
/// - Output: Range 10..90, link rewritten in order
fn reversed_price_bounds() {
    let app = session("/shop?priceFrom=90&priceTo=10");
    assert_eq!(app.filter.price_range(), Some(PriceRange::new(10, 90)));
    assert_eq!(app.link(), "/shop?priceFrom=10&priceTo=90");
}

#[test]
/// What: Location encoding and decoding agree for a state built through intents
///
/// - Input: Session moved through several intents
/// - Output: Decoding the current address yields the live filter
fn address_tracks_filter() {
    let mut app = session("/shop/watches");
    bootstrap(&mut app);
    apply_intent(&mut app, UserIntent::SetSortOrder(SortOrder::Descending));
    apply_intent(&mut app, UserIntent::SetPage(3));
    let location = Location::parse(&app.link()).expect("own link parses");
    assert_eq!(decode_location(&location), app.filter);
    assert_eq!(&encode_location(&app.filter), app.history.current());
}

#[test]
/// What: Breadcrumb reset returns to the shop root without growing history
///
/// - Input: `/shop/phones?page=2`; ClearCategory; Back
/// - Output: `/shop`; one history entry; Back is a no-op
fn breadcrumb_reset_replaces_entry() {
    let mut app = session("/shop/phones?page=2");
    bootstrap(&mut app);
    assert!(matches!(
        apply_intent(&mut app, UserIntent::ClearCategory),
        IntentOutcome::Dispatched(_)
    ));
    assert_eq!(app.link(), "/shop");
    assert_eq!(app.history.len(), 1);
    assert_eq!(apply_intent(&mut app, UserIntent::Back), IntentOutcome::Unchanged);
}
