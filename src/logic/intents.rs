//! User intents and how they flow into the filter, the address and the fetcher.
//!
//! One intent produces at most one filter change. A change is written to the
//! address history (category-level changes replace the current entry, all
//! other filter edits push a new one) and immediately issues a goods request
//! with a fresh token.

use tokio::sync::mpsc;

use crate::route::HistoryMode;
use crate::state::{AppState, GoodsRequest, PriceRange, SortOrder};

use super::query_codec::{decode_location, encode_location};

/// Something the user asked the listing to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    /// Pick a category from the selector.
    SelectCategory(String),
    /// Breadcrumb reset back to the whole shop.
    ClearCategory,
    /// Check or uncheck one brand.
    ToggleBrand(String),
    /// Replace the whole brand selection.
    SetBrands(Vec<String>),
    /// Apply (or clear) the price bounds.
    SetPriceRange(Option<PriceRange>),
    /// Change the price ordering.
    SetSortOrder(SortOrder),
    /// Jump to a page.
    SetPage(u32),
    /// Re-run the current query (manual retry).
    Refresh,
    /// Step back through the address history.
    Back,
    /// Step forward through the address history.
    Forward,
}

/// Why an intent was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Brand and price controls need the bounds of a loaded result.
    BoundsNotLoaded,
}

/// Work the runtime must start after an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Goods request carrying the new current token.
    pub goods: GoodsRequest,
    /// Whether the one-shot category fetch should run as well.
    pub fetch_categories: bool,
}

/// Result of applying an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// The filter did not change; nothing to do.
    Unchanged,
    /// The intent was refused in the current phase.
    Ignored(IgnoreReason),
    /// The filter changed (or a refetch was requested).
    Dispatched(Dispatch),
}

/// What: Issue the requests for a session that has just been entered.
///
/// Inputs:
/// - `app`: Freshly decoded session
///
/// Output:
/// - `Dispatch` for the first goods page, with the category fetch claimed when uncached.
pub fn bootstrap(app: &mut AppState) -> Dispatch {
    let fetch_categories = app.fetch.claim_categories();
    let goods = app.fetch.issue(&app.filter, app.options.per_page);
    tracing::info!(link = %app.link(), token = %goods.token, "catalog session started");
    Dispatch {
        goods,
        fetch_categories,
    }
}

/// What: Apply one user intent to the session.
///
/// Inputs:
/// - `app`: Session state
/// - `intent`: What the user asked for
///
/// Output:
/// - `IntentOutcome` describing the requests to start, if any.
///
/// Details:
/// - Brand and price intents are refused until a result for the current category is displayed.
/// - Category, sort and page intents are accepted even while loading.
/// - History steps adopt the stored address and refetch without recording a new entry.
pub fn apply_intent(app: &mut AppState, intent: UserIntent) -> IntentOutcome {
    let needs_bounds = matches!(
        intent,
        UserIntent::ToggleBrand(_) | UserIntent::SetBrands(_) | UserIntent::SetPriceRange(_)
    );
    if needs_bounds && app.fetch.bounds_for(app.filter.category()).is_none() {
        tracing::debug!(?intent, "filter bounds not loaded yet; intent ignored");
        return IntentOutcome::Ignored(IgnoreReason::BoundsNotLoaded);
    }
    let (next, mode) = match intent {
        UserIntent::SelectCategory(category) => (
            app.filter.with_category(Some(category)),
            HistoryMode::Replace,
        ),
        UserIntent::ClearCategory => (app.filter.without_category(), HistoryMode::Replace),
        UserIntent::ToggleBrand(brand) => {
            (app.filter.with_brand_toggled(&brand), HistoryMode::Push)
        }
        UserIntent::SetBrands(brands) => (app.filter.with_brands(brands), HistoryMode::Push),
        UserIntent::SetPriceRange(range) => {
            (app.filter.with_price_range(range), HistoryMode::Push)
        }
        UserIntent::SetSortOrder(order) => (app.filter.with_sort_order(order), HistoryMode::Push),
        UserIntent::SetPage(page) => (app.filter.with_page(page), HistoryMode::Push),
        UserIntent::Refresh => {
            let fetch_categories = app.fetch.claim_categories();
            return IntentOutcome::Dispatched(Dispatch {
                goods: app.fetch.issue(&app.filter, app.options.per_page),
                fetch_categories,
            });
        }
        UserIntent::Back => return step_history(app, false),
        UserIntent::Forward => return step_history(app, true),
    };

    if next == app.filter {
        return IntentOutcome::Unchanged;
    }
    reset_cursors(app, mode == HistoryMode::Replace);
    app.filter = next;
    let location = encode_location(&app.filter);
    tracing::debug!(link = %location, ?mode, "address updated");
    app.history.record(location, mode);
    IntentOutcome::Dispatched(Dispatch {
        goods: app.fetch.issue(&app.filter, app.options.per_page),
        fetch_categories: false,
    })
}

/// What: Move through the address history and adopt the stored state.
///
/// Inputs:
/// - `app`: Session state
/// - `forward`: Direction of the step
///
/// Output:
/// - `Dispatched` with a refetch, or `Unchanged` at either end of the history.
fn step_history(app: &mut AppState, forward: bool) -> IntentOutcome {
    let target = if forward {
        app.history.forward().cloned()
    } else {
        app.history.back().cloned()
    };
    let Some(location) = target else {
        return IntentOutcome::Unchanged;
    };
    let restored = decode_location(&location);
    reset_cursors(app, restored.category() != app.filter.category());
    app.filter = restored;
    tracing::debug!(link = %location, forward, "history step");
    IntentOutcome::Dispatched(Dispatch {
        goods: app.fetch.issue(&app.filter, app.options.per_page),
        fetch_categories: false,
    })
}

/// What: Hand the requests of a `Dispatch` to the background workers.
///
/// Inputs:
/// - `dispatch`: Requests to start
/// - `goods_tx`: Goods worker queue
/// - `categories_tx`: Category worker trigger
///
/// Details:
/// - Workers that already shut down are ignored; the session is ending anyway.
pub fn send_dispatch(
    dispatch: Dispatch,
    goods_tx: &mpsc::UnboundedSender<GoodsRequest>,
    categories_tx: &mpsc::UnboundedSender<()>,
) {
    if dispatch.fetch_categories {
        let _ = categories_tx.send(());
    }
    let _ = goods_tx.send(dispatch.goods);
}

/// What: Reset per-listing cursors after a filter change.
///
/// Inputs:
/// - `app`: Session state
/// - `category_changed`: Also reset brand cursor and price draft
fn reset_cursors(app: &mut AppState, category_changed: bool) {
    app.grid_cursor = 0;
    if category_changed {
        app.brand_cursor = 0;
        app.price_draft = None;
    }
}
