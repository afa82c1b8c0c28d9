use std::fs;
use std::path::Path;
use std::time::Duration;

use super::parsing::{parse_bool, strip_inline_comment};
use super::paths::{config_dir, resolve_settings_config_path};
use super::types::Settings;

/// Commented default settings written on first run.
pub(crate) const SETTINGS_SKELETON: &str = "\
# shopfront settings
# Lines are `key = value`; `#` starts a comment.

# Base URL of the catalog API (GET {api_url}/goods, GET {api_url}/categories)
api_url = http://localhost:3000/api
# Items per page
page_size = 12
# Per-request timeout in milliseconds
fetch_timeout_ms = 8000
# Rows between the top of the sidebar and a docked filter panel
sticky_offset = 2
# Price editor step in percent of the category's highest price
price_step_pct = 5
# Browse the built-in demo catalog instead of the API
offline = false
# Artificial latency of the demo catalog, in milliseconds
fixture_latency_ms = 250
";

/// What: Load user settings from `settings.conf`.
///
/// Output:
/// - `Settings`; `Settings::default()` values for anything missing or invalid.
///
/// Details:
/// - Writes the commented skeleton to the config directory when no file exists yet.
pub fn settings() -> Settings {
    let mut out = Settings::default();
    let path = resolve_settings_config_path().unwrap_or_else(|| {
        let target = config_dir().join("settings.conf");
        if !target.exists() {
            match fs::write(&target, SETTINGS_SKELETON) {
                Ok(()) => tracing::info!(path = %target.display(), "wrote default settings"),
                Err(e) => tracing::warn!(path = %target.display(), error = %e, "could not write default settings"),
            }
        }
        target
    });
    match fs::read_to_string(&path) {
        Ok(content) => parse_settings(&content, &path, &mut out),
        Err(e) => tracing::debug!(path = %path.display(), error = %e, "settings file unreadable"),
    }
    out
}

/// What: Parse settings from `settings.conf` content.
///
/// Inputs:
/// - `content`: File contents
/// - `settings_path`: Path used in log messages
/// - `settings`: Values to overwrite
///
/// Details:
/// - Keys are case-insensitive; `.`, `-` and spaces normalize to `_`.
/// - Unknown keys and unparsable values are logged and skipped.
/// - `page_size` is clamped to 1..=100.
pub(crate) fn parse_settings(content: &str, settings_path: &Path, settings: &mut Settings) {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, val_raw)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(val_raw.trim());
        let applied = match key.as_str() {
            "api_url" | "api" => {
                if val.is_empty() {
                    false
                } else {
                    settings.api_url = val.to_string();
                    true
                }
            }
            "page_size" | "per_page" => val
                .parse::<u32>()
                .map(|v| settings.page_size = v.clamp(1, 100))
                .is_ok(),
            "fetch_timeout_ms" => val
                .parse::<u64>()
                .map(|v| settings.fetch_timeout = Duration::from_millis(v.max(1)))
                .is_ok(),
            "sticky_offset" => val
                .parse::<u16>()
                .map(|v| settings.sticky_offset = v)
                .is_ok(),
            "price_step_pct" => val
                .parse::<u8>()
                .map(|v| settings.price_step_pct = v.clamp(1, 100))
                .is_ok(),
            "offline" => parse_bool(val).map(|v| settings.offline = v).is_some(),
            "fixture_latency_ms" => val
                .parse::<u64>()
                .map(|v| settings.fixture_latency = Duration::from_millis(v))
                .is_ok(),
            _ => {
                tracing::debug!(path = %settings_path.display(), key = %key, "unknown settings key");
                continue;
            }
        };
        if !applied {
            tracing::warn!(
                path = %settings_path.display(),
                key = %key,
                value = %val,
                "invalid settings value; keeping default"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Every documented key is read, comments are ignored
    ///
    /// - Input: Settings text with inline comments and odd key spelling
    /// - Output: Parsed values in `Settings`
    fn parses_all_keys() {
        let text = "\
# comment
API-URL = https://shop.example/api # prod
page_size = 24
fetch_timeout_ms = 1500
sticky.offset = 4
price_step_pct = 10
offline = yes
fixture_latency_ms = 0
";
        let mut s = Settings::default();
        parse_settings(text, Path::new("settings.conf"), &mut s);
        assert_eq!(s.api_url, "https://shop.example/api");
        assert_eq!(s.page_size, 24);
        assert_eq!(s.fetch_timeout, Duration::from_millis(1500));
        assert_eq!(s.sticky_offset, 4);
        assert_eq!(s.price_step_pct, 10);
        assert!(s.offline);
        assert_eq!(s.fixture_latency, Duration::ZERO);
    }

    #[test]
    /// What: Invalid and unknown entries keep defaults
    ///
    /// - Input: Non-numeric page size, bad bool, unknown key, line without `=`
    /// - Output: `Settings::default()`
    fn invalid_values_keep_defaults() {
        let text = "page_size = lots\noffline = perhaps\ncolor = blue\njust words\n";
        let mut s = Settings::default();
        parse_settings(text, Path::new("settings.conf"), &mut s);
        assert_eq!(s, Settings::default());
    }

    #[test]
    /// What: Out-of-range values are clamped
    ///
    /// - Input: `page_size = 0`, `price_step_pct = 250`
    /// - Output: 1 and 100
    fn clamps_ranges() {
        let mut s = Settings::default();
        parse_settings(
            "page_size = 0\nprice_step_pct = 250",
            Path::new("x"),
            &mut s,
        );
        assert_eq!(s.page_size, 1);
        assert_eq!(s.price_step_pct, 100);
    }

    #[test]
    /// What: The written skeleton parses back to the defaults
    ///
    /// - Input: `SETTINGS_SKELETON` stored in a temp file
    /// - Output: `Settings::default()`
    fn skeleton_matches_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.conf");
        fs::write(&path, SETTINGS_SKELETON).expect("write skeleton");
        let content = fs::read_to_string(&path).expect("read back");
        let mut s = Settings::default();
        parse_settings(&content, &path, &mut s);
        assert_eq!(s, Settings::default());
    }
}
