//! Fetch completion handling and the stale-response guard.

use super::ListingController;
use crate::listing::error::ListingError;
use crate::listing::messages::{Effect, FetchRequest};
use crate::listing::pagination::clamp_page;
use crate::listing::source::ResultPage;
use crate::listing::state::{LoadStatus, ViewMode};

impl<T> ListingController<T>
where
    T: Clone,
{
    /// Returns true when `request` is the latest fetch this controller issued.
    ///
    /// Completions for any other request are stale and must be discarded.
    #[must_use]
    pub fn is_current(&self, request: &FetchRequest) -> bool {
        self.mounted
            && self
                .in_flight
                .as_ref()
                .is_some_and(|current| current.id == request.id)
    }

    pub(super) fn handle_fetch_completed(
        &mut self,
        request: &FetchRequest,
        result: Result<ResultPage<T>, ListingError>,
    ) -> Option<Effect> {
        if !self.is_current(request) {
            tracing::trace!(
                request_id = request.id,
                page = request.query.page,
                "discarding stale listing response"
            );
            return None;
        }
        self.in_flight = None;

        match result {
            Ok(page) => self.apply_page(request, page),
            Err(error) => {
                self.record_failure(request, &error);
                None
            }
        }
    }

    fn apply_page(&mut self, request: &FetchRequest, result: ResultPage<T>) -> Option<Effect> {
        let fetched = result.items.len();
        self.total_count = result.total_count;
        self.has_more = fetched == self.page_size.get();
        self.status = LoadStatus::Loaded;
        self.error = None;
        self.failed = None;

        let requested_page = request.query.page;
        let last_page = self.total_pages();
        match self.mode {
            ViewMode::Paged => {
                if fetched == 0 && requested_page > last_page.max(1) {
                    // The set shrank underneath us; show the last real page.
                    self.page = clamp_page(requested_page, last_page);
                    return self.issue_fetch();
                }
                self.items = result.items;
                self.loaded_page = requested_page;
            }
            ViewMode::Accumulating => {
                self.items.extend(result.items);
                self.page = clamp_page(requested_page, last_page);
                self.loaded_page = self.page;
            }
        }
        None
    }

    fn record_failure(&mut self, request: &FetchRequest, error: &ListingError) {
        tracing::warn!(
            request_id = request.id,
            page = request.query.page,
            "listing fetch failed: {error}"
        );
        self.status = LoadStatus::Error;
        self.error = Some(error.to_string());
        self.failed = Some(request.clone());
        self.page = self.loaded_page.max(1);
    }
}
