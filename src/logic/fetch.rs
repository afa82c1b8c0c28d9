//! Goods request lifecycle and the session category cache.
//!
//! Every issued goods request gets a fresh [`RequestToken`]. Only the most
//! recently issued, still-unresolved token is accepted when results come
//! back; anything else is a superseded request whose result is dropped.
//! Superseded requests are not cancelled on the wire.

use crate::error::{FetchError, StaleResultDiscarded};
use crate::state::{FetchResult, FilterState, GoodsRequest, RequestToken};

/// Lifecycle of the current goods request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Nothing issued yet.
    #[default]
    Idle,
    /// The current token is awaiting its response.
    Pending,
    /// The current token resolved successfully.
    Loaded,
    /// The current token failed; prior data (if any) is still held.
    Failed(FetchError),
}

/// What a non-stale resolution did to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The result is now the displayed snapshot.
    Loaded,
    /// The request failed; `kept_previous` tells whether an older snapshot remains.
    Failed {
        /// Whether a prior `FetchResult` is still available for display.
        kept_previous: bool,
    },
}

/// Session cache of the category list; fetched once, never refreshed once filled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum CategoryCache {
    /// Not requested, or the last attempt failed.
    #[default]
    Empty,
    /// A request is in flight.
    Requested,
    /// Populated for the rest of the session.
    Ready(Vec<String>),
}

/// Decides which goods responses are allowed to reach the view.
#[derive(Debug, Default)]
pub struct FetchOrchestrator {
    last_issued: Option<RequestToken>,
    awaiting: Option<RequestToken>,
    status: FetchStatus,
    awaiting_category: Option<String>,
    latest: Option<FetchResult>,
    latest_category: Option<String>,
    categories: CategoryCache,
    categories_error: Option<FetchError>,
}

impl FetchOrchestrator {
    /// What: Mint a token and build the goods request for `filter`.
    ///
    /// Inputs:
    /// - `filter`: Snapshot to fetch
    /// - `per_page`: Page size
    ///
    /// Output:
    /// - `GoodsRequest` tagged with the new current token.
    ///
    /// Details:
    /// - Any previously awaited token becomes stale immediately.
    pub fn issue(&mut self, filter: &FilterState, per_page: u32) -> GoodsRequest {
        let token = self
            .last_issued
            .map_or_else(RequestToken::first, RequestToken::next);
        if let Some(prev) = self.awaiting {
            tracing::debug!(superseded = %prev, current = %token, "goods request superseded");
        }
        self.last_issued = Some(token);
        self.awaiting = Some(token);
        self.awaiting_category = filter.category().map(str::to_string);
        self.status = FetchStatus::Pending;
        GoodsRequest {
            token,
            query: filter.to_query(per_page),
        }
    }

    /// What: Accept or discard the outcome of a goods request.
    ///
    /// Inputs:
    /// - `token`: Token echoed by the response
    /// - `result`: Fetch outcome
    ///
    /// Output:
    /// - `Ok(Resolution)` when `token` is the awaited one.
    /// - `Err(StaleResultDiscarded)` when it was superseded or already resolved.
    ///
    /// Details:
    /// - A failure keeps the previous snapshot and the category it was fetched for;
    ///   no retry is scheduled.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        result: Result<FetchResult, FetchError>,
    ) -> Result<Resolution, StaleResultDiscarded> {
        if self.awaiting != Some(token) {
            return Err(StaleResultDiscarded {
                stale: token,
                current: self.last_issued,
            });
        }
        self.awaiting = None;
        let category = self.awaiting_category.take();
        match result {
            Ok(snapshot) => {
                self.latest = Some(snapshot);
                self.latest_category = category;
                self.status = FetchStatus::Loaded;
                Ok(Resolution::Loaded)
            }
            Err(err) => {
                self.status = FetchStatus::Failed(err);
                Ok(Resolution::Failed {
                    kept_previous: self.latest.is_some(),
                })
            }
        }
    }

    /// Status of the current request.
    #[must_use]
    pub const fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// Token of the request awaiting a response, if any.
    #[must_use]
    pub const fn awaiting(&self) -> Option<RequestToken> {
        self.awaiting
    }

    /// Most recent accepted snapshot, possibly from an earlier filter state.
    #[must_use]
    pub const fn latest(&self) -> Option<&FetchResult> {
        self.latest.as_ref()
    }

    /// What: Snapshot the view should display.
    ///
    /// Output:
    /// - The latest snapshot when the current request loaded or failed; `None` while pending.
    ///
    /// Details:
    /// - While pending the view shows placeholders instead of the previous snapshot.
    #[must_use]
    pub fn displayed(&self) -> Option<&FetchResult> {
        match self.status {
            FetchStatus::Loaded | FetchStatus::Failed(_) => self.latest.as_ref(),
            FetchStatus::Idle | FetchStatus::Pending => None,
        }
    }

    /// What: Displayed snapshot, if it was fetched for `category`.
    ///
    /// Inputs:
    /// - `category`: Category of the current filter
    ///
    /// Output:
    /// - `None` while pending, or when the displayed snapshot belongs to another category.
    ///
    /// Details:
    /// - Brand lists and price maxima come from here, so a failed category switch never
    ///   offers the previous category's bounds.
    #[must_use]
    pub fn bounds_for(&self, category: Option<&str>) -> Option<&FetchResult> {
        self.displayed()
            .filter(|_| self.latest_category.as_deref() == category)
    }

    /// What: Claim the one-shot category fetch.
    ///
    /// Output:
    /// - `true` exactly when the caller should fetch categories now.
    ///
    /// Details:
    /// - Returns `false` while a fetch is in flight or once the list is cached.
    pub fn claim_categories(&mut self) -> bool {
        if self.categories == CategoryCache::Empty {
            self.categories = CategoryCache::Requested;
            true
        } else {
            false
        }
    }

    /// What: Store the outcome of the category fetch.
    ///
    /// Inputs:
    /// - `result`: Category list or failure
    ///
    /// Details:
    /// - A failure releases the claim so a later manual refresh may try again.
    /// - A list arriving after the cache is already filled is ignored.
    pub fn store_categories(&mut self, result: Result<Vec<String>, FetchError>) {
        if matches!(self.categories, CategoryCache::Ready(_)) {
            return;
        }
        match result {
            Ok(list) => {
                self.categories = CategoryCache::Ready(list);
                self.categories_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "category list fetch failed");
                self.categories = CategoryCache::Empty;
                self.categories_error = Some(err);
            }
        }
    }

    /// Cached category list.
    #[must_use]
    pub fn categories(&self) -> Option<&[String]> {
        match &self.categories {
            CategoryCache::Ready(list) => Some(list),
            _ => None,
        }
    }

    /// Last category fetch failure, cleared once the list arrives.
    #[must_use]
    pub const fn categories_error(&self) -> Option<&FetchError> {
        self.categories_error.as_ref()
    }
}
