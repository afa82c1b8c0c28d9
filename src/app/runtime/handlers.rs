use crate::error::FetchError;
use crate::logic::fetch::Resolution;
use crate::state::{AppState, GoodsResponse};

/// What: Feed a goods response into the orchestrator.
///
/// Inputs:
/// - `app`: Application state
/// - `response`: Tagged result from the goods worker
///
/// Details:
/// - Responses for superseded tokens are dropped and only logged.
/// - The grid cursor is clamped to the new page.
pub fn handle_goods_response(app: &mut AppState, response: GoodsResponse) {
    let GoodsResponse { token, result } = response;
    match app.fetch.resolve(token, result) {
        Ok(Resolution::Loaded) => {
            let shown = app.fetch.displayed().map_or(0, |r| r.items.len());
            app.grid_cursor = app.grid_cursor.min(shown.saturating_sub(1));
            tracing::info!(
                token = %token,
                items = shown,
                total = app.fetch.displayed().map_or(0, |r| r.total),
                link = %app.link(),
                "listing loaded"
            );
        }
        Ok(Resolution::Failed { kept_previous }) => {
            tracing::warn!(token = %token, kept_previous, status = ?app.fetch.status(), "listing request failed");
        }
        Err(stale) => {
            tracing::debug!(error = %stale, current = ?stale.current, "stale goods response dropped");
        }
    }
}

/// What: Store the outcome of the one-shot category fetch.
///
/// Inputs:
/// - `app`: Application state
/// - `result`: Category slugs or the failure
pub fn handle_categories_response(app: &mut AppState, result: Result<Vec<String>, FetchError>) {
    match &result {
        Ok(list) => tracing::info!(count = list.len(), "categories loaded"),
        Err(err) => tracing::warn!(error = %err, "categories request failed"),
    }
    app.fetch.store_categories(result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::fetch::FetchStatus;
    use crate::logic::intents::{UserIntent, apply_intent, bootstrap};
    use crate::sources::StaticCatalog;

    #[test]
    /// What: Only the current token's response reaches the view
    ///
    /// - Input: Bootstrap, then page 2; page 2 answers first, the bootstrap answer arrives late
    /// - Output: Page 2 items displayed; late answer ignored
    fn late_response_is_dropped() {
        let catalog = StaticCatalog::demo();
        let mut app = AppState::default();
        let first = bootstrap(&mut app);
        apply_intent(&mut app, UserIntent::SetPage(2));
        let second = app.fetch.awaiting().expect("page 2 pending");
        let page2 = catalog.query(&app.filter.to_query(app.options.per_page));

        handle_goods_response(
            &mut app,
            GoodsResponse {
                token: second,
                result: Ok(page2.clone()),
            },
        );
        handle_goods_response(
            &mut app,
            GoodsResponse {
                token: first.goods.token,
                result: Ok(catalog.query(&first.goods.query)),
            },
        );
        assert_eq!(app.fetch.displayed(), Some(&page2));
        assert_eq!(app.fetch.status(), &FetchStatus::Loaded);
    }

    #[test]
    /// What: Failures keep the previous page and the cursor
    ///
    /// - Input: Loaded root, then a refresh that times out
    /// - Output: Failed status; previous result still the latest
    fn failure_keeps_previous_result() {
        let catalog = StaticCatalog::demo();
        let mut app = AppState::default();
        let d = bootstrap(&mut app);
        handle_goods_response(
            &mut app,
            GoodsResponse {
                token: d.goods.token,
                result: Ok(catalog.query(&d.goods.query)),
            },
        );
        app.grid_cursor = 5;
        apply_intent(&mut app, UserIntent::Refresh);
        let token = app.fetch.awaiting().expect("refresh pending");
        handle_goods_response(
            &mut app,
            GoodsResponse {
                token,
                result: Err(FetchError::Timeout(std::time::Duration::from_secs(8))),
            },
        );
        assert!(matches!(app.fetch.status(), FetchStatus::Failed(_)));
        assert_eq!(app.fetch.latest().map(|r| r.total), Some(24));
        assert_eq!(app.grid_cursor, 5);
    }

    #[test]
    /// What: Category results fill the session cache
    ///
    /// - Input: `Ok(["phones"])`
    /// - Output: `categories()` returns the list
    fn categories_are_cached() {
        let mut app = AppState::default();
        bootstrap(&mut app);
        handle_categories_response(&mut app, Ok(vec!["phones".into()]));
        assert_eq!(app.fetch.categories(), Some(&["phones".to_string()][..]));
    }
}
