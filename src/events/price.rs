//! Price range editing: arrow keys nudge a draft that `Enter` applies.

use crate::state::{AppState, PriceRange};

/// Which bound an arrow key moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// `priceFrom`.
    Low,
    /// `priceTo`.
    High,
}

/// What: Step size for the price editor.
///
/// Inputs:
/// - `max`: Maximal price of the displayed result
/// - `pct`: Step in percent of `max`
///
/// Output:
/// - At least `1`.
#[must_use]
pub fn step(max: u64, pct: u8) -> u64 {
    (max.saturating_mul(u64::from(pct)) / 100).max(1)
}

/// What: Nudge one bound of the draft by one step.
///
/// Inputs:
/// - `app`: Session state; the draft starts from the applied range or the full bounds
/// - `max`: Maximal price of the displayed result
/// - `bound`: Bound to move
/// - `up`: Direction
///
/// Details:
/// - The low bound never passes the high bound and the high bound stays within `max`.
pub fn nudge(app: &mut AppState, max: u64, bound: Bound, up: bool) {
    let current = app
        .price_draft
        .or_else(|| app.filter.price_range())
        .unwrap_or_else(|| PriceRange::new(0, max));
    let delta = step(max, app.options.price_step_pct);
    let (mut low, mut high) = (current.from(), current.to().min(max));
    match (bound, up) {
        (Bound::Low, true) => low = low.saturating_add(delta).min(high),
        (Bound::Low, false) => low = low.saturating_sub(delta),
        (Bound::High, true) => high = high.saturating_add(delta).min(max),
        (Bound::High, false) => high = high.saturating_sub(delta).max(low),
    }
    app.price_draft = Some(PriceRange::new(low, high));
}
