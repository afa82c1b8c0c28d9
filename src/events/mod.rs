//! Event handling layer for the catalog TUI.
//!
//! Key presses are translated into [`UserIntent`]s (or local cursor moves) by
//! [`handle_key`]; [`handle_event`] applies the intent and hands the resulting
//! requests to the background workers.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::logic::intents::{IntentOutcome, UserIntent, apply_intent, send_dispatch};
use crate::logic::viewport::Breakpoint;
use crate::state::{AppState, Focus, GoodsRequest};
use crate::ui::view::{derive_view, pagination};

mod price;

/// What a key press resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Leave the application.
    Quit,
    /// Apply this intent.
    Intent(UserIntent),
    /// Local state (focus, cursor, draft) changed; redraw only.
    Handled,
    /// The key means nothing here.
    Ignored,
}

/// Dispatch a single terminal event and mutate the [`AppState`].
///
/// Returns `true` to signal the application should exit; otherwise `false`.
pub fn handle_event(
    ev: CEvent,
    app: &mut AppState,
    goods_tx: &mpsc::UnboundedSender<GoodsRequest>,
    categories_tx: &mpsc::UnboundedSender<()>,
) -> bool {
    match ev {
        CEvent::Resize(width, _) => {
            let next = Breakpoint::from_width(width);
            if next != app.breakpoint {
                tracing::debug!(width, breakpoint = ?next, "breakpoint changed");
                app.breakpoint = next;
            }
            false
        }
        CEvent::Key(ke) if ke.kind == KeyEventKind::Press => match handle_key(app, ke) {
            KeyAction::Quit => true,
            KeyAction::Intent(intent) => {
                match apply_intent(app, intent) {
                    IntentOutcome::Dispatched(dispatch) => {
                        send_dispatch(dispatch, goods_tx, categories_tx);
                    }
                    IntentOutcome::Ignored(reason) => {
                        tracing::debug!(?reason, "key ignored");
                    }
                    IntentOutcome::Unchanged => {}
                }
                false
            }
            KeyAction::Handled | KeyAction::Ignored => false,
        },
        _ => false,
    }
}

/// What: Translate a key press into an action for the current focus.
///
/// Inputs:
/// - `app`: Session state (focus, cursors and price draft may change)
/// - `ke`: Pressed key
///
/// Output:
/// - `KeyAction` for the caller to carry out.
///
/// Details:
/// - Global keys are checked before the focused control sees the key.
pub fn handle_key(app: &mut AppState, ke: KeyEvent) -> KeyAction {
    if let Some(action) = handle_global(app, ke) {
        return action;
    }
    match app.focus {
        Focus::Categories => handle_categories(app, ke.code),
        Focus::Brands => handle_brands(app, ke.code),
        Focus::Price => handle_price(app, ke.code),
        Focus::Grid => handle_grid(app, ke.code),
    }
}

fn handle_global(app: &mut AppState, ke: KeyEvent) -> Option<KeyAction> {
    let alt = ke.modifiers.contains(KeyModifiers::ALT);
    let action = match ke.code {
        KeyCode::Char('c') if ke.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Left if alt => KeyAction::Intent(UserIntent::Back),
        KeyCode::Right if alt => KeyAction::Intent(UserIntent::Forward),
        KeyCode::Char('b') => KeyAction::Intent(UserIntent::Back),
        KeyCode::Char('r') => KeyAction::Intent(UserIntent::Refresh),
        KeyCode::Char('s') => {
            KeyAction::Intent(UserIntent::SetSortOrder(app.filter.sort_order().toggled()))
        }
        KeyCode::Char('n') | KeyCode::PageDown => {
            let p = pagination(app);
            if p.can_next {
                KeyAction::Intent(UserIntent::SetPage(p.page.saturating_add(1)))
            } else {
                KeyAction::Ignored
            }
        }
        KeyCode::Char('p') | KeyCode::PageUp => {
            let p = pagination(app);
            if p.can_prev {
                KeyAction::Intent(UserIntent::SetPage(p.page - 1))
            } else {
                KeyAction::Ignored
            }
        }
        KeyCode::Backspace => KeyAction::Intent(UserIntent::ClearCategory),
        KeyCode::Char('x') => {
            app.price_draft = None;
            KeyAction::Intent(UserIntent::SetPriceRange(None))
        }
        KeyCode::Char('f') => {
            app.filters_expanded = !app.filters_expanded;
            KeyAction::Handled
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            KeyAction::Handled
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            KeyAction::Handled
        }
        _ => return None,
    };
    Some(action)
}

/// Move `cursor` one row within `len` rows.
fn move_cursor(cursor: &mut usize, len: usize, down: bool) -> KeyAction {
    if len == 0 {
        return KeyAction::Ignored;
    }
    *cursor = if down {
        (*cursor + 1).min(len - 1)
    } else {
        cursor.saturating_sub(1).min(len - 1)
    };
    KeyAction::Handled
}

fn handle_categories(app: &mut AppState, code: KeyCode) -> KeyAction {
    let rows = derive_view(app).controls.categories;
    match code {
        KeyCode::Up => move_cursor(&mut app.category_cursor, rows.len(), false),
        KeyCode::Down => move_cursor(&mut app.category_cursor, rows.len(), true),
        KeyCode::Enter => match rows.into_iter().nth(app.category_cursor) {
            Some(row) => KeyAction::Intent(
                row.slug
                    .map_or(UserIntent::ClearCategory, UserIntent::SelectCategory),
            ),
            None => KeyAction::Ignored,
        },
        _ => KeyAction::Ignored,
    }
}

fn handle_brands(app: &mut AppState, code: KeyCode) -> KeyAction {
    let Some(rows) = derive_view(app).controls.brands else {
        return KeyAction::Ignored;
    };
    match code {
        KeyCode::Up => move_cursor(&mut app.brand_cursor, rows.len(), false),
        KeyCode::Down => move_cursor(&mut app.brand_cursor, rows.len(), true),
        KeyCode::Char(' ') | KeyCode::Enter => match rows.into_iter().nth(app.brand_cursor) {
            Some(row) => KeyAction::Intent(UserIntent::ToggleBrand(row.name)),
            None => KeyAction::Ignored,
        },
        _ => KeyAction::Ignored,
    }
}

fn handle_price(app: &mut AppState, code: KeyCode) -> KeyAction {
    let Some(max) = app
        .fetch
        .bounds_for(app.filter.category())
        .map(|r| r.maximal_price)
    else {
        return KeyAction::Ignored;
    };
    match code {
        KeyCode::Left => price::nudge(app, max, price::Bound::Low, false),
        KeyCode::Right => price::nudge(app, max, price::Bound::Low, true),
        KeyCode::Up => price::nudge(app, max, price::Bound::High, true),
        KeyCode::Down => price::nudge(app, max, price::Bound::High, false),
        KeyCode::Enter => {
            return match app.price_draft.take() {
                Some(draft) => KeyAction::Intent(UserIntent::SetPriceRange(Some(draft))),
                None => KeyAction::Ignored,
            };
        }
        _ => return KeyAction::Ignored,
    }
    KeyAction::Handled
}

fn handle_grid(app: &mut AppState, code: KeyCode) -> KeyAction {
    let cards = derive_view(app).cards.len();
    if cards == 0 {
        return KeyAction::Ignored;
    }
    let columns = usize::from(app.layout().columns.max(1));
    let last = cards - 1;
    let cursor = app.grid_cursor.min(last);
    app.grid_cursor = match code {
        KeyCode::Left => cursor.saturating_sub(1),
        KeyCode::Right => (cursor + 1).min(last),
        KeyCode::Up => cursor.saturating_sub(columns),
        KeyCode::Down if cursor + columns <= last => cursor + columns,
        KeyCode::Down => cursor,
        _ => return KeyAction::Ignored,
    };
    KeyAction::Handled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::intents::bootstrap;
    use crate::sources::StaticCatalog;
    use crate::state::{PriceRange, SessionOptions, SortOrder};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded(link: &str) -> AppState {
        let mut app = AppState::from_link(link, SessionOptions::default());
        let catalog = StaticCatalog::demo();
        let d = bootstrap(&mut app);
        app.fetch.store_categories(Ok(catalog.categories().to_vec()));
        let result = catalog.query(&d.goods.query);
        app.fetch.resolve(d.goods.token, Ok(result)).expect("current");
        app
    }

    #[test]
    /// What: Quit keys and focus cycling
    ///
    /// - Input: q, Esc, Ctrl+C; Tab and BackTab from the grid
    /// - Output: Quit thrice; focus moves Grid -> Categories -> Grid
    fn global_keys() {
        let mut app = AppState::default();
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            handle_key(
                &mut app,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            KeyAction::Quit
        );
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Categories);
        handle_key(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::Grid);
    }

    #[test]
    /// What: Sort, history and page keys become intents
    ///
    /// - Input: s, Alt+Left, p on page 1, n on page 1 of two
    /// - Output: Descending sort, Back, ignored prev, next page 2
    fn listing_keys_map_to_intents() {
        let mut app = loaded("/shop");
        assert_eq!(
            handle_key(&mut app, key(KeyCode::Char('s'))),
            KeyAction::Intent(UserIntent::SetSortOrder(SortOrder::Descending))
        );
        assert_eq!(
            handle_key(&mut app, KeyEvent::new(KeyCode::Left, KeyModifiers::ALT)),
            KeyAction::Intent(UserIntent::Back)
        );
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('p'))), KeyAction::Ignored);
        assert_eq!(
            handle_key(&mut app, key(KeyCode::PageDown)),
            KeyAction::Intent(UserIntent::SetPage(2))
        );
    }

    #[test]
    /// What: Next page is refused on the last page
    ///
    /// - Input: Watches (5 items, 12 per page)
    /// - Output: n ignored
    fn next_page_stops_at_last_page() {
        let mut app = loaded("/shop/watches");
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('n'))), KeyAction::Ignored);
    }

    #[test]
    /// What: Category list selection
    ///
    /// - Input: Focus categories; Down then Enter; Up to "All" then Enter
    /// - Output: SelectCategory for the first slug; ClearCategory for the first row
    fn category_selection() {
        let mut app = loaded("/shop");
        app.focus = Focus::Categories;
        handle_key(&mut app, key(KeyCode::Down));
        let first_slug = app.fetch.categories().expect("cached")[0].clone();
        assert_eq!(
            handle_key(&mut app, key(KeyCode::Enter)),
            KeyAction::Intent(UserIntent::SelectCategory(first_slug))
        );
        handle_key(&mut app, key(KeyCode::Up));
        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.category_cursor, 0);
        assert_eq!(
            handle_key(&mut app, key(KeyCode::Enter)),
            KeyAction::Intent(UserIntent::ClearCategory)
        );
    }

    #[test]
    /// What: Brand toggling needs loaded bounds
    ///
    /// - Input: Brands focused while loading; then loaded phones with Space
    /// - Output: Ignored first; ToggleBrand of the first brand after load
    fn brand_toggle() {
        let mut pending = AppState::default();
        bootstrap(&mut pending);
        pending.focus = Focus::Brands;
        assert_eq!(handle_key(&mut pending, key(KeyCode::Char(' '))), KeyAction::Ignored);

        let mut app = loaded("/shop/phones");
        app.focus = Focus::Brands;
        let first = app.fetch.displayed().expect("loaded").brands[0].clone();
        assert_eq!(
            handle_key(&mut app, key(KeyCode::Char(' '))),
            KeyAction::Intent(UserIntent::ToggleBrand(first))
        );
    }

    #[test]
    /// What: Price editor drafts then applies
    ///
    /// - Input: Loaded phones (max 1299, 5% step); Right then Enter
    /// - Output: SetPriceRange(64..1299), draft cleared
    fn price_draft_applies_on_enter() {
        let mut app = loaded("/shop/phones");
        app.focus = Focus::Price;
        assert_eq!(handle_key(&mut app, key(KeyCode::Right)), KeyAction::Handled);
        assert_eq!(app.price_draft, Some(PriceRange::new(64, 1299)));
        assert_eq!(
            handle_key(&mut app, key(KeyCode::Enter)),
            KeyAction::Intent(UserIntent::SetPriceRange(Some(PriceRange::new(64, 1299))))
        );
        assert!(app.price_draft.is_none());
    }

    #[test]
    /// What: Grid cursor moves by cells and rows, clamped to the cards
    ///
    /// - Input: Loaded phones at Lg width (3 columns, 8 cards); Down, Down, Down, Right
    /// - Output: Cursor 3, 6, 6, 7
    fn grid_cursor_is_clamped() {
        let mut app = loaded("/shop/phones");
        app.breakpoint = Breakpoint::Lg;
        let columns = usize::from(app.layout().columns);
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.grid_cursor, columns);
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Right));
        handle_key(&mut app, key(KeyCode::Right));
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.grid_cursor, 7);
    }

    #[test]
    /// What: handle_event applies intents and queues the goods request
    ///
    /// - Input: Loaded shop; `s` key event; resize to 40 columns
    /// - Output: One queued request with descending sort; breakpoint Xs
    fn handle_event_dispatches() {
        let mut app = loaded("/shop");
        let (goods_tx, mut goods_rx) = mpsc::unbounded_channel();
        let (cat_tx, mut cat_rx) = mpsc::unbounded_channel();
        let quit = handle_event(
            CEvent::Key(key(KeyCode::Char('s'))),
            &mut app,
            &goods_tx,
            &cat_tx,
        );
        assert!(!quit);
        let req = goods_rx.try_recv().expect("request queued");
        assert_eq!(req.query.sort_order, SortOrder::Descending);
        assert!(cat_rx.try_recv().is_err());
        assert_eq!(app.link(), "/shop?sort=desc");

        handle_event(CEvent::Resize(40, 20), &mut app, &goods_tx, &cat_tx);
        assert_eq!(app.breakpoint, Breakpoint::from_width(40));
        assert!(handle_event(
            CEvent::Key(key(KeyCode::Char('q'))),
            &mut app,
            &goods_tx,
            &cat_tx
        ));
    }
}
