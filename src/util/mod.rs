//! Small formatting helpers shared by the view and the renderer.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What: Upper-case the first character of a slug for display.
///
/// Inputs:
/// - `s`: Slug such as `phones`
///
/// Output:
/// - `Phones`; dashes and underscores become spaces.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let spaced = s.replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// What: Format a whole-unit price with thousands separators.
///
/// Inputs:
/// - `price`: Amount in whole currency units
///
/// Output:
/// - String like `$1,299`.
#[must_use]
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// What: Render a 0-5 rating as stars, rounded to the nearest whole star.
#[must_use]
pub fn format_rating(rate: f32) -> String {
    let clamped = rate.clamp(0.0, 5.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let full = clamped.round() as usize;
    format!("{}{} {clamped:.1}", "★".repeat(full), "☆".repeat(5 - full))
}

/// What: Truncate text to a display width, appending `…` when cut.
///
/// Inputs:
/// - `s`: Text to fit
/// - `max`: Available cells
///
/// Output:
/// - `s` unchanged if it fits; otherwise a prefix plus `…` no wider than `max`.
#[must_use]
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
