use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::error::FetchError;
use crate::sources::CatalogSource;
use crate::state::{GoodsRequest, GoodsResponse};

use super::workers::{spawn_categories_worker, spawn_goods_worker};

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - Contains all channel senders and receivers used for communication
///   between the main event loop and background workers
pub struct Channels {
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    pub event_thread_cancelled: Arc<AtomicBool>,
    pub goods_req_tx: mpsc::UnboundedSender<GoodsRequest>,
    pub goods_res_rx: mpsc::UnboundedReceiver<GoodsResponse>,
    pub categories_req_tx: mpsc::UnboundedSender<()>,
    pub categories_res_rx: mpsc::UnboundedReceiver<Result<Vec<String>, FetchError>>,
    pub tick_tx: mpsc::UnboundedSender<()>,
    pub tick_rx: mpsc::UnboundedReceiver<()>,
}

impl Channels {
    /// What: Create all channels and spawn the fetch workers behind them.
    ///
    /// Inputs:
    /// - `source`: Catalog backend shared by both workers
    /// - `fetch_timeout`: Upper bound for a single request
    ///
    /// Output:
    /// - `Channels` with the request ends and the response receivers.
    pub fn new(source: &Arc<dyn CatalogSource>, fetch_timeout: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<CEvent>();
        let (goods_req_tx, goods_req_rx) = mpsc::unbounded_channel::<GoodsRequest>();
        let (goods_res_tx, goods_res_rx) = mpsc::unbounded_channel::<GoodsResponse>();
        let (categories_req_tx, categories_req_rx) = mpsc::unbounded_channel::<()>();
        let (categories_res_tx, categories_res_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel::<()>();

        spawn_goods_worker(Arc::clone(source), fetch_timeout, goods_req_rx, goods_res_tx);
        spawn_categories_worker(
            Arc::clone(source),
            fetch_timeout,
            categories_req_rx,
            categories_res_tx,
        );

        Self {
            event_tx,
            event_rx,
            event_thread_cancelled: Arc::new(AtomicBool::new(false)),
            goods_req_tx,
            goods_res_rx,
            categories_req_tx,
            categories_res_rx,
            tick_tx,
            tick_rx,
        }
    }
}
