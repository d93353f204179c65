//! Search text handlers for the listing controller.
//!
//! Raw text goes through the debouncer; only a settled change restarts the
//! query from page 1.

use tokio::time::Instant;

use super::ListingController;
use crate::listing::messages::Effect;

impl<T> ListingController<T>
where
    T: Clone,
{
    /// Records raw search text and arms the debounce timer.
    pub(super) fn handle_search_changed(&mut self, text: String, at: Instant) -> Option<Effect> {
        let deadline = self.search.update(text, at);
        Some(Effect::ScheduleSettle { deadline })
    }

    /// Settles the search text once its deadline has passed.
    ///
    /// A timer that fires early re-arms for the pending deadline. A settled
    /// value equal to the previous one leaves the listing untouched.
    pub(super) fn handle_settle_due(&mut self, at: Instant) -> Option<Effect> {
        match self.search.poll(at) {
            Some(settled) => {
                tracing::debug!(search = %settled, "search settled");
                self.reset_query();
                self.issue_fetch()
            }
            None => self
                .search
                .deadline()
                .map(|deadline| Effect::ScheduleSettle { deadline }),
        }
    }
}
