use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};

use crate::logic::intents::bootstrap;
use crate::sources::CatalogSource;
use crate::state::AppState;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Resolve the listing for `app` once and describe it as JSON.
///
/// Inputs:
/// - `source`: Catalog backend
/// - `app`: Session decoded from the entry link
/// - `fetch_timeout`: Deadline for each request
///
/// Output:
/// - JSON object with the canonical link, categories and the listing page.
///
/// Details:
/// - A failed category fetch is reported inline; a failed goods fetch is an error.
pub async fn dump_listing(
    source: &Arc<dyn CatalogSource>,
    app: &mut AppState,
    fetch_timeout: Duration,
) -> Result<Value> {
    let dispatch = bootstrap(app);
    let categories = if dispatch.fetch_categories {
        match tokio::time::timeout(fetch_timeout, source.fetch_categories()).await {
            Ok(Ok(list)) => json!(list),
            Ok(Err(err)) => json!({ "error": err.to_string() }),
            Err(_) => json!({ "error": format!("timed out after {}ms", fetch_timeout.as_millis()) }),
        }
    } else {
        Value::Null
    };
    let result = tokio::time::timeout(fetch_timeout, source.fetch_goods(dispatch.goods.query))
        .await
        .map_err(|_| format!("goods request timed out after {}ms", fetch_timeout.as_millis()))??;
    tracing::info!(total = result.total, link = %app.link(), "dump resolved");
    Ok(json!({
        "link": app.link(),
        "filter": &app.filter,
        "categories": categories,
        "result": result,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::StaticCatalog;
    use crate::state::SessionOptions;

    #[tokio::test]
    /// What: Dump resolves the entry link against the fixture
    ///
    /// - Input: `/shop/laptops?sort=desc` with the demo catalog
    /// - Output: Canonical link, four categories, six laptops with the priciest first
    async fn dump_resolves_link() {
        let source: Arc<dyn CatalogSource> = Arc::new(StaticCatalog::demo());
        let mut app = AppState::from_link("/shop/laptops?sort=desc", SessionOptions::default());
        let value = dump_listing(&source, &mut app, Duration::from_secs(2))
            .await
            .expect("dump");
        assert_eq!(value["link"], "/shop/laptops?sort=desc");
        assert_eq!(value["categories"].as_array().map(Vec::len), Some(4));
        assert_eq!(value["result"]["total"], 6);
        assert_eq!(value["result"]["maximalPrice"], 2199);
        assert_eq!(value["result"]["items"][0]["price"], 2199);
    }
}
