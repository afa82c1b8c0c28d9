use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::select;

use crate::state::AppState;
use crate::ui::ui;

use super::channels::Channels;
use super::handlers::{handle_categories_response, handle_goods_response};

/// What: Process one iteration of channel message handling.
///
/// Inputs:
/// - `app`: Application state
/// - `channels`: Communication channels for background workers
///
/// Output: `true` if the event loop should exit, `false` to continue
async fn process_channel_messages(app: &mut AppState, channels: &mut Channels) -> bool {
    select! {
        Some(ev) = channels.event_rx.recv() => {
            crate::events::handle_event(
                ev,
                app,
                &channels.goods_req_tx,
                &channels.categories_req_tx,
            )
        }
        Some(response) = channels.goods_res_rx.recv() => {
            handle_goods_response(app, response);
            false
        }
        Some(result) = channels.categories_res_rx.recv() => {
            handle_categories_response(app, result);
            false
        }
        Some(()) = channels.tick_rx.recv() => false,
        else => true
    }
}

/// What: Run the main event loop, processing all channel messages and rendering the UI.
///
/// Inputs:
/// - `terminal`: Terminal to render into
/// - `app`: Application state
/// - `channels`: Communication channels for background workers
///
/// Details:
/// - Exits when the event handler asks to quit or every channel has closed.
pub async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
    channels: &mut Channels,
) {
    loop {
        if let Err(err) = terminal.draw(|f| ui(f, app)) {
            tracing::warn!(error = %err, "frame draw failed");
        }
        if process_channel_messages(app, channels).await {
            break;
        }
    }
}
