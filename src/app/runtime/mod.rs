use std::sync::Arc;
use std::sync::atomic::Ordering;

use ratatui::{Terminal, backend::CrosstermBackend};

use crate::args::Args;
use crate::logic::intents::{bootstrap, send_dispatch};
use crate::logic::viewport::Breakpoint;
use crate::sources::{CatalogSource, HttpCatalog, StaticCatalog};
use crate::state::{AppState, SessionOptions};
use crate::theme::Settings;

use super::dump::dump_listing;
use super::terminal::{restore_terminal, setup_terminal};

mod channels;
mod event_loop;
mod handlers;
mod workers;

use channels::Channels;
use event_loop::run_event_loop;
use workers::{spawn_event_thread, spawn_tick_worker};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Pick the catalog backend for this session.
///
/// Inputs:
/// - `args`: Parsed command line (fixture path)
/// - `settings`: Effective settings (offline flag, latency, API URL)
///
/// Output:
/// - Shared `CatalogSource`, or the error that prevented building it.
fn build_source(args: &Args, settings: &Settings) -> Result<Arc<dyn CatalogSource>> {
    if settings.offline {
        let catalog = match &args.fixture {
            Some(path) => StaticCatalog::from_file(path)?,
            None => StaticCatalog::demo(),
        };
        return Ok(Arc::new(catalog.with_latency(settings.fixture_latency)));
    }
    Ok(Arc::new(HttpCatalog::new(
        &settings.api_url,
        settings.fetch_timeout,
    )?))
}

/// Session knobs carried over from the effective settings.
const fn session_options(settings: &Settings) -> SessionOptions {
    SessionOptions {
        per_page: settings.page_size,
        sticky_offset: settings.sticky_offset,
        price_step_pct: settings.price_step_pct,
    }
}

/// What: Run the storefront end-to-end: build the catalog backend, decode the
/// entry link, spawn background workers, drive the event loop, and restore the
/// terminal on exit.
///
/// Inputs:
/// - `args`: Parsed command line
/// - `settings`: Settings file merged with the command line
///
/// Output:
/// - `Ok(())` when the UI exits cleanly; `Err` on unrecoverable terminal or setup errors.
///
/// Details:
/// - `--dump` skips the terminal entirely and prints the resolved listing as JSON.
/// - The final shareable link is printed after the terminal is restored.
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let source = build_source(&args, &settings)?;
    tracing::info!(source = %source.describe(), "catalog source ready");

    let link = args.link.as_deref().unwrap_or("/shop");
    let mut app = AppState::from_link(link, session_options(&settings));

    if args.dump {
        let value = dump_listing(&source, &mut app, settings.fetch_timeout).await?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if let Ok((width, _)) = crossterm::terminal::size() {
        app.breakpoint = Breakpoint::from_width(width);
    }

    let mut channels = Channels::new(&source, settings.fetch_timeout);
    spawn_tick_worker(channels.tick_tx.clone());
    spawn_event_thread(
        channels.event_tx.clone(),
        Arc::clone(&channels.event_thread_cancelled),
    );

    let dispatch = bootstrap(&mut app);
    send_dispatch(
        dispatch,
        &channels.goods_req_tx,
        &channels.categories_req_tx,
    );

    setup_terminal()?;
    let mut terminal = match Terminal::new(CrosstermBackend::new(std::io::stdout())) {
        Ok(t) => t,
        Err(err) => {
            restore_terminal()?;
            return Err(err.into());
        }
    };

    run_event_loop(&mut terminal, &mut app, &mut channels).await;

    channels.event_thread_cancelled.store(true, Ordering::Relaxed);
    restore_terminal()?;
    tracing::info!(link = %app.link(), "session ended");
    println!("{}", app.link());
    Ok(())
}
