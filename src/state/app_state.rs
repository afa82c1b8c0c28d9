//! Listing session state owned by the event loop.

use crate::logic::fetch::FetchOrchestrator;
use crate::logic::query_codec::{decode_location, encode_location};
use crate::logic::viewport::{Breakpoint, LayoutDecision, layout_for};
use crate::route::{History, Location};

use super::filter::FilterState;
use super::types::{Focus, PriceRange};

/// Items per page when nothing else is configured.
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Session-wide knobs taken from the settings file and CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Items requested per page (also the placeholder count).
    pub per_page: u32,
    /// Rows between the sidebar top and a docked filter panel.
    pub sticky_offset: u16,
    /// Price editor step, in percent of the category's maximal price.
    pub price_step_pct: u8,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            sticky_offset: 2,
            price_step_pct: 5,
        }
    }
}

/// Everything the event loop mutates while browsing.
///
/// `filter` is the single authoritative filter record; it is only replaced
/// through the intent handlers in `logic::intents`.
#[derive(Debug)]
pub struct AppState {
    /// Current filter, sort and page selection.
    pub filter: FilterState,
    /// Goods request lifecycle and cached categories.
    pub fetch: FetchOrchestrator,
    /// Address history; the current entry always encodes `filter`.
    pub history: History,
    /// Latest terminal width class.
    pub breakpoint: Breakpoint,
    /// Control receiving key input.
    pub focus: Focus,
    /// Highlighted row in the category list (0 = whole shop).
    pub category_cursor: usize,
    /// Highlighted row in the brand list.
    pub brand_cursor: usize,
    /// Highlighted card in the grid.
    pub grid_cursor: usize,
    /// Price bounds being edited but not yet applied.
    pub price_draft: Option<PriceRange>,
    /// Whether the collapsed filter accordion is unfolded.
    pub filters_expanded: bool,
    /// Session knobs.
    pub options: SessionOptions,
}

impl AppState {
    /// What: Start a session from a parsed address.
    ///
    /// Inputs:
    /// - `location`: Entry address
    /// - `options`: Session knobs
    ///
    /// Output:
    /// - `AppState` whose filter is decoded from `location`.
    ///
    /// Details:
    /// - The history starts from the canonical encoding, so malformed pieces
    ///   of the entry link are dropped from the address.
    #[must_use]
    pub fn from_location(location: &Location, options: SessionOptions) -> Self {
        let filter = decode_location(location);
        let canonical = encode_location(&filter);
        if &canonical != location {
            tracing::debug!(
                entry = %location,
                canonical = %canonical,
                "entry link canonicalized"
            );
        }
        Self {
            filter,
            fetch: FetchOrchestrator::default(),
            history: History::new(canonical),
            breakpoint: Breakpoint::default(),
            focus: Focus::default(),
            category_cursor: 0,
            brand_cursor: 0,
            grid_cursor: 0,
            price_draft: None,
            filters_expanded: false,
            options,
        }
    }

    /// What: Start a session from raw link text.
    ///
    /// Inputs:
    /// - `link`: Path, query or absolute URL
    /// - `options`: Session knobs
    ///
    /// Output:
    /// - `AppState`; an unparsable link falls back to the shop root.
    #[must_use]
    pub fn from_link(link: &str, options: SessionOptions) -> Self {
        let location = Location::parse(link).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "unusable entry link; starting at the shop root");
            Location::default()
        });
        Self::from_location(&location, options)
    }

    /// Shareable link for the current state.
    #[must_use]
    pub fn link(&self) -> String {
        self.history.current().to_string()
    }

    /// Layout decisions for the current breakpoint.
    #[must_use]
    pub const fn layout(&self) -> LayoutDecision {
        layout_for(self.breakpoint, self.options.sticky_offset)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_location(&Location::default(), SessionOptions::default())
    }
}
