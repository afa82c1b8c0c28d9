use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::error::FetchError;
use crate::sources::CatalogSource;
use crate::state::{GoodsRequest, GoodsResponse};

/// Interval between redraw ticks.
const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Await `fut`, turning an elapsed deadline into `FetchError::Timeout`.
async fn with_timeout<T>(
    limit: Duration,
    fut: impl Future<Output = Result<T, FetchError>>,
) -> Result<T, FetchError> {
    tokio::time::timeout(limit, fut)
        .await
        .unwrap_or(Err(FetchError::Timeout(limit)))
}

/// What: Spawn background worker for goods requests.
///
/// Inputs:
/// - `source`: Catalog backend
/// - `fetch_timeout`: Deadline for each request
/// - `req_rx`: Requests issued by the event loop
/// - `res_tx`: Responses tagged with the request token
///
/// Details:
/// - Every request runs in its own task so a slow one never delays a newer one;
///   the event loop drops responses whose token is no longer current.
pub fn spawn_goods_worker(
    source: Arc<dyn CatalogSource>,
    fetch_timeout: Duration,
    mut req_rx: mpsc::UnboundedReceiver<GoodsRequest>,
    res_tx: mpsc::UnboundedSender<GoodsResponse>,
) {
    tokio::spawn(async move {
        while let Some(request) = req_rx.recv().await {
            let GoodsRequest { token, query } = request;
            tracing::debug!(token = %token, page = query.page, "goods request started");
            let fut = source.fetch_goods(query);
            let tx = res_tx.clone();
            tokio::spawn(async move {
                let result = with_timeout(fetch_timeout, fut).await;
                let _ = tx.send(GoodsResponse { token, result });
            });
        }
        tracing::debug!("goods worker stopped");
    });
}

/// What: Spawn background worker for the category list.
///
/// Inputs:
/// - `source`: Catalog backend
/// - `fetch_timeout`: Deadline for each request
/// - `req_rx`: Triggers; one per claimed fetch
/// - `res_tx`: Category list or failure
pub fn spawn_categories_worker(
    source: Arc<dyn CatalogSource>,
    fetch_timeout: Duration,
    mut req_rx: mpsc::UnboundedReceiver<()>,
    res_tx: mpsc::UnboundedSender<Result<Vec<String>, FetchError>>,
) {
    tokio::spawn(async move {
        while req_rx.recv().await.is_some() {
            let result = with_timeout(fetch_timeout, source.fetch_categories()).await;
            if res_tx.send(result).is_err() {
                break;
            }
        }
    });
}

/// Spawn the periodic redraw tick.
pub fn spawn_tick_worker(tick_tx: mpsc::UnboundedSender<()>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        loop {
            interval.tick().await;
            if tick_tx.send(()).is_err() {
                break;
            }
        }
    });
}

/// What: Spawn the blocking terminal event reader.
///
/// Inputs:
/// - `event_tx`: Channel for terminal events
/// - `cancelled`: Set on exit; checked between polls
///
/// Details:
/// - Polls with a 50ms timeout so cancellation is noticed promptly.
pub fn spawn_event_thread(event_tx: mpsc::UnboundedSender<CEvent>, cancelled: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        loop {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            match crossterm::event::poll(Duration::from_millis(50)) {
                Ok(true) => {
                    // transient read errors are ignored
                    if let Ok(ev) = crossterm::event::read()
                        && (cancelled.load(Ordering::Relaxed) || event_tx.send(ev).is_err())
                    {
                        break;
                    }
                }
                Ok(false) | Err(_) => {}
            }
        }
    });
}
