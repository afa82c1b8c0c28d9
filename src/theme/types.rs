use std::time::Duration;

use ratatui::style::Color;

/// Application palette used by rendering code.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Slightly lighter background layer used behind panels.
    pub mantle: Color,
    /// Subtle surface color for placeholders and disabled controls.
    pub surface1: Color,
    /// Muted border color.
    pub overlay1: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text for captions and brand names.
    pub subtext0: Color,
    /// Accent for focus and selection.
    pub sapphire: Color,
    /// Accent for headings and the page title.
    pub mauve: Color,
    /// Prices and positive state.
    pub green: Color,
    /// Ratings and warnings.
    pub yellow: Color,
    /// Error banner and struck-through old prices.
    pub red: Color,
    /// Breadcrumbs and links.
    pub lavender: Color,
}

/// User-configurable settings parsed from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the catalog API.
    pub api_url: String,
    /// Items per page (also the placeholder count while loading).
    pub page_size: u32,
    /// Bound applied to every catalog request.
    pub fetch_timeout: Duration,
    /// Rows between the sidebar top and a docked filter panel.
    pub sticky_offset: u16,
    /// Price editor step, in percent of the category's maximal price.
    pub price_step_pct: u8,
    /// Browse the built-in fixture instead of the API.
    pub offline: bool,
    /// Artificial delay of fixture responses.
    pub fixture_latency: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            page_size: crate::state::DEFAULT_PER_PAGE,
            fetch_timeout: Duration::from_secs(8),
            sticky_offset: 2,
            price_step_pct: 5,
            offline: false,
            fixture_latency: Duration::from_millis(250),
        }
    }
}
