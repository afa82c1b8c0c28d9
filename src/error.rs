//! Error taxonomy for the catalog engine.
//!
//! None of these are fatal to a browsing session:
//! - [`DecodeError`] is recovered where it happens (the field keeps its default).
//! - [`FetchError`] is surfaced to the view as a banner while prior data stays visible.
//! - [`StaleResultDiscarded`] is an internal signal that a superseded response was dropped.

use std::time::Duration;

use crate::state::RequestToken;

/// A query parameter that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Value was expected to be a positive integer.
    #[error("`{key}` expects a positive integer, got `{value}`")]
    InvalidInteger {
        /// Query key carrying the value.
        key: String,
        /// Raw value as found in the link.
        value: String,
    },
    /// Only one of `priceFrom` / `priceTo` was present.
    #[error("price range needs both `priceFrom` and `priceTo`")]
    IncompletePriceRange,
    /// `sort` carried an unknown order.
    #[error("unknown sort order `{0}`")]
    InvalidSortOrder(String),
    /// A brand token contained characters that cannot round-trip.
    #[error("unusable brand identifier `{0}`")]
    InvalidBrand(String),
    /// The link itself could not be parsed as a path or URL.
    #[error("unparsable link `{0}`")]
    InvalidLink(String),
}

/// Failure of a catalog data-source call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The call did not complete within the configured bound.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    /// Transport-level failure (DNS, connection reset, TLS, ...).
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with a non-success HTTP status.
    #[error("catalog service answered with status {0}")]
    Status(u16),
    /// The payload could not be decoded.
    #[error("malformed catalog response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// What: Classify a reqwest failure, reporting client-side expiry as a timeout.
    ///
    /// Inputs:
    /// - `err`: Error returned by the HTTP client
    /// - `limit`: Deadline the client was configured with
    #[must_use]
    pub fn from_reqwest(err: reqwest::Error, limit: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(limit)
        } else {
            err.into()
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Signal that a resolved fetch belonged to a superseded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("discarded result of superseded request {stale}")]
pub struct StaleResultDiscarded {
    /// Token carried by the late response.
    pub stale: RequestToken,
    /// Token of the request currently awaited (or last resolved), if any was issued.
    pub current: Option<RequestToken>,
}
