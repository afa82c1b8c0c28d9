//! Address representation: the `/shop[/<category>]` route plus its query string.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::{Url, form_urlencoded};

use crate::error::DecodeError;

/// Route prefix of the catalog listing.
pub const SHOP_ROOT: &str = "/shop";

/// Base used to resolve relative links.
const LINK_BASE: &str = "http://shopfront.invalid/shop";

/// Characters escaped inside the category path segment (RFC 3986 unreserved set stays intact).
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Ordered key/value pairs of a link's query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryString(Vec<(String, String)>);

impl QueryString {
    /// What: Parse raw query text.
    ///
    /// Inputs:
    /// - `raw`: Query text, with or without the leading `?`
    ///
    /// Output: Decoded pairs in their original order.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().trim_start_matches('?');
        Self(
            form_urlencoded::parse(raw.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        )
    }

    /// Value of the first pair named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Append a pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Whether no pairs are present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish();
        f.write_str(&encoded)
    }
}

/// A shareable catalog address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Category route segment; `None` for the shop root.
    pub category: Option<String>,
    /// Filter query.
    pub query: QueryString,
}

impl Location {
    /// What: Parse a link into a location.
    ///
    /// Inputs:
    /// - `link`: Absolute URL, root-relative path (`/shop/phones?page=2`) or bare query (`?page=2`)
    ///
    /// Output:
    /// - `Ok(Location)`; `Err(DecodeError::InvalidLink)` when the text is not a URL at all.
    ///
    /// Details:
    /// - A leading `shop` segment is skipped; the next non-empty segment is the category.
    /// - Deeper segments (e.g. product ids) are ignored.
    pub fn parse(link: &str) -> Result<Self, DecodeError> {
        let trimmed = link.trim();
        let url = match Url::parse(trimmed) {
            Ok(url) => url,
            Err(_) => Url::parse(LINK_BASE)
                .and_then(|base| base.join(trimmed))
                .map_err(|_| DecodeError::InvalidLink(trimmed.to_string()))?,
        };
        let mut segments = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .peekable();
        if segments.peek().is_some_and(|s| s == "shop") {
            segments.next();
        }
        let category = segments.next().filter(|c| !c.trim().is_empty());
        Ok(Self {
            category,
            query: QueryString::parse(url.query().unwrap_or_default()),
        })
    }

    /// Route path without the query, e.g. `/shop/laptops`.
    #[must_use]
    pub fn path(&self) -> String {
        match &self.category {
            Some(category) => format!(
                "{SHOP_ROOT}/{}",
                utf8_percent_encode(category, SEGMENT)
            ),
            None => SHOP_ROOT.to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}
