/// What: Remove inline comments from a configuration value.
///
/// Inputs:
/// - `s`: Raw value that may include inline comments.
///
/// Output:
/// - Comment-free & trimmed substring of the input.
///
/// Details:
/// - Strips trailing `//` sections and `#` sections. URLs keep their `://`
///   because only a `//` preceded by whitespace or at the start counts.
pub(crate) fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = find_comment_slashes(s) {
        s = &s[..i];
    }
    if let Some(i) = s.find('#') {
        s = &s[..i];
    }
    s.trim()
}

fn find_comment_slashes(s: &str) -> Option<usize> {
    s.match_indices("//")
        .map(|(i, _)| i)
        .find(|&i| i == 0 || s[..i].ends_with(char::is_whitespace))
}

/// What: Interpret a config flag the way the settings file documents it.
///
/// Output:
/// - `Some(bool)` for `true/false`, `yes/no`, `on/off`, `1/0`; `None` otherwise.
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
