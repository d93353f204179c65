//! Navigation, accumulation, mode, and retry handlers.

use super::ListingController;
use crate::listing::messages::Effect;
use crate::listing::pagination::clamp_page;
use crate::listing::state::{LoadStatus, ViewMode};

impl<T> ListingController<T>
where
    T: Clone,
{
    /// Moves to the previous page; a no-op on page 1.
    pub(super) fn handle_prev_page(&mut self) -> Option<Effect> {
        if !self.can_prev() {
            return None;
        }
        self.go_to(self.page.saturating_sub(1))
    }

    /// Moves to the next page; a no-op on the last page.
    pub(super) fn handle_next_page(&mut self) -> Option<Effect> {
        if !self.can_next() {
            return None;
        }
        self.go_to(self.page.saturating_add(1))
    }

    /// Moves to `requested`, clamped to `[1, max(1, total_pages)]`.
    pub(super) fn handle_go_to_page(&mut self, requested: u32) -> Option<Effect> {
        if self.mode != ViewMode::Paged {
            tracing::trace!(requested, "page navigation ignored outside paged mode");
            return None;
        }
        self.go_to(clamp_page(requested, self.total_pages()))
    }

    fn go_to(&mut self, target: u32) -> Option<Effect> {
        let settled = matches!(self.status, LoadStatus::Loading | LoadStatus::Loaded);
        if target == self.page && settled {
            return None;
        }
        self.page = target;
        self.issue_fetch()
    }

    /// Loads the next page when the end of the accumulated list is near.
    ///
    /// Ignored unless in accumulating mode, not loading, and the last page
    /// was full.
    pub(super) fn handle_near_end(&mut self, visible: bool) -> Option<Effect> {
        if !visible || self.mode != ViewMode::Accumulating {
            return None;
        }
        if self.status == LoadStatus::Loading {
            tracing::trace!("near-end signal suppressed while loading");
            return None;
        }
        if !self.has_more {
            return None;
        }
        self.page = self.loaded_page.saturating_add(1);
        self.issue_fetch()
    }

    /// Switches mode, restarting from page 1 with no accumulated items.
    pub(super) fn handle_set_mode(&mut self, mode: ViewMode) -> Option<Effect> {
        if mode == self.mode {
            return None;
        }
        tracing::debug!(from = %self.mode, to = %mode, "switching view mode");
        self.mode = mode;
        self.items.clear();
        self.reset_query();
        self.issue_fetch()
    }

    /// Re-issues the most recent failed fetch.
    pub(super) fn handle_retry(&mut self) -> Option<Effect> {
        let failed = self.failed.take()?;
        self.page = failed.query.page;
        self.issue_fetch()
    }
}
