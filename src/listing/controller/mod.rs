//! Listing query controller.
//!
//! The controller owns search text, the current page, the loaded items and
//! the view mode. Every transition is a synchronous function of a
//! [`ListingMsg`]; whenever asynchronous work is needed the transition
//! returns an [`Effect`] that the caller executes and answers with another
//! message. This keeps the state machine deterministic under test and makes
//! the only suspension points the debounce timer and the fetch.
//!
//! A fetch result is applied only when it answers the latest request the
//! controller issued. Requests are reissued on every change of settled
//! search, mode or page, so a result that passes this check was asked with
//! the controller's current parameters; anything older is discarded.

mod fetch_handlers;
mod pagination_handlers;
mod search_handlers;


use std::num::NonZeroUsize;
use std::time::Duration;

use super::debounce::Debounce;
use super::messages::{Effect, FetchRequest, ListingMsg};
use super::pagination::{DEFAULT_PAGE_SIZE, PageInfo, total_pages};
use super::source::PageQuery;
use super::state::{ListingSnapshot, LoadStatus, ViewMode};

/// Quiescence window applied to search text when none is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Construction options for a [`ListingController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingOptions {
    /// Items per page.
    pub page_size: NonZeroUsize,
    /// Debounce window for search text.
    pub debounce: Duration,
    /// Initial presentation mode.
    pub mode: ViewMode,
    /// Search text in effect at mount.
    pub initial_search: String,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            mode: ViewMode::default(),
            initial_search: String::new(),
        }
    }
}

impl ListingOptions {
    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the debounce window.
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the initial mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the search text in effect at mount.
    #[must_use]
    pub fn with_initial_search(mut self, search: impl Into<String>) -> Self {
        self.initial_search = search.into();
        self
    }
}

/// State machine behind a searchable, paged listing.
#[derive(Debug, Clone)]
pub struct ListingController<T> {
    search: Debounce<String>,
    mode: ViewMode,
    page_size: NonZeroUsize,
    /// Page shown (paged) or highest page requested (accumulating).
    page: u32,
    /// Highest page applied for the current query; 0 when none.
    loaded_page: u32,
    items: Vec<T>,
    total_count: usize,
    has_more: bool,
    status: LoadStatus,
    error: Option<String>,
    next_request_id: u64,
    in_flight: Option<FetchRequest>,
    failed: Option<FetchRequest>,
    mounted: bool,
}

impl<T> ListingController<T>
where
    T: Clone,
{
    /// Creates an unmounted controller.
    #[must_use]
    pub fn new(options: ListingOptions) -> Self {
        Self {
            search: Debounce::new(options.initial_search, options.debounce),
            mode: options.mode,
            page_size: options.page_size,
            page: 1,
            loaded_page: 0,
            items: Vec::new(),
            total_count: 0,
            has_more: true,
            status: LoadStatus::Idle,
            error: None,
            next_request_id: 1,
            in_flight: None,
            failed: None,
            mounted: false,
        }
    }

    /// Mounts the controller and requests the first page.
    ///
    /// Query state starts fresh on every mount, so a remounted listing begins
    /// at page 1 with nothing shown. Mounting twice is a no-op.
    pub fn mount(&mut self) -> Option<Effect> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        self.items.clear();
        self.total_count = 0;
        self.status = LoadStatus::Idle;
        self.error = None;
        self.reset_query();
        tracing::debug!(mode = %self.mode, "listing controller mounted");
        self.issue_fetch()
    }

    /// Tears the controller down.
    ///
    /// The pending debounce deadline is dropped and any outstanding fetch is
    /// forgotten, so its eventual completion changes nothing. Messages
    /// received afterwards are ignored.
    pub fn unmount(&mut self) -> Option<Effect> {
        if !self.mounted {
            return None;
        }
        self.mounted = false;
        self.search.cancel();
        self.in_flight = None;
        self.failed = None;
        tracing::debug!("listing controller unmounted");
        Some(Effect::CancelSettle)
    }

    /// Applies a message and returns the effect it requires, if any.
    pub fn handle_message(&mut self, msg: ListingMsg<T>) -> Option<Effect> {
        if !self.mounted {
            tracing::trace!("ignoring message for unmounted listing controller");
            return None;
        }

        match msg {
            ListingMsg::SearchChanged { text, at } => self.handle_search_changed(text, at),
            ListingMsg::SettleDue { at } => self.handle_settle_due(at),
            ListingMsg::PrevPage => self.handle_prev_page(),
            ListingMsg::NextPage => self.handle_next_page(),
            ListingMsg::GoToPage(page) => self.handle_go_to_page(page),
            ListingMsg::NearEnd(visible) => self.handle_near_end(visible),
            ListingMsg::SetMode(mode) => self.handle_set_mode(mode),
            ListingMsg::ToggleMode => self.handle_set_mode(self.mode.toggled()),
            ListingMsg::Retry => self.handle_retry(),
            ListingMsg::FetchCompleted { request, result } => {
                self.handle_fetch_completed(&request, result)
            }
        }
    }

    /// Returns everything the UI shell renders.
    #[must_use]
    pub fn snapshot(&self) -> ListingSnapshot<T> {
        ListingSnapshot {
            items: self.items.clone(),
            status: self.status,
            error: self.error.clone(),
            page: self.page,
            total_pages: self.total_pages(),
            total_count: self.total_count,
            has_more: self.has_more,
            mode: self.mode,
            can_prev: self.can_prev(),
            can_next: self.can_next(),
            search: self.search.raw().clone(),
            settled_search: self.search.settled().clone(),
            visible_range: self.visible_range(),
        }
    }

    /// Returns the items currently shown.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the current page (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the active mode.
    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    /// Returns the latest fetch failure message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the size of the filtered result set.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns `ceil(total_count / page_size)`.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count, self.page_size)
    }

    /// Returns whether the last fetched page was full.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Returns true while mounted.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns the search text the listing currently reflects.
    #[must_use]
    pub fn settled_search(&self) -> &str {
        self.search.settled()
    }

    /// Returns the outstanding request, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<&FetchRequest> {
        self.in_flight.as_ref()
    }

    /// Returns whether "previous" is enabled.
    #[must_use]
    pub const fn can_prev(&self) -> bool {
        matches!(self.mode, ViewMode::Paged) && self.page > 1
    }

    /// Returns whether "next" is enabled.
    #[must_use]
    pub fn can_next(&self) -> bool {
        self.mode == ViewMode::Paged && self.page < self.total_pages()
    }

    /// Returns the 1-based `(first, last)` item numbers on screen.
    ///
    /// In paged mode this is the footer's "showing X to Y of Z" range for the
    /// page whose items are displayed, and `None` while the items on screen
    /// belong to an earlier query. In accumulating mode it always starts at 1.
    #[must_use]
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        match self.mode {
            ViewMode::Paged => {
                if self.loaded_page == 0 {
                    return None;
                }
                PageInfo::new(self.loaded_page, self.page_size, self.total_count)
                    .displayed_range(self.items.len())
            }
            ViewMode::Accumulating => (!self.items.is_empty()).then_some((1, self.items.len())),
        }
    }

    /// Resets page and accumulation for a new query.
    fn reset_query(&mut self) {
        self.page = 1;
        self.loaded_page = 0;
        self.has_more = true;
        self.failed = None;
        if self.mode == ViewMode::Accumulating {
            self.items.clear();
        }
    }

    /// Issues a fetch for the current search, mode, and page.
    ///
    /// A fetch with the same parameters already in flight is not repeated.
    fn issue_fetch(&mut self) -> Option<Effect> {
        let query = PageQuery::new(self.search.settled().clone(), self.page, self.page_size);
        if self
            .in_flight
            .as_ref()
            .is_some_and(|current| current.mode == self.mode && current.query == query)
        {
            tracing::trace!(page = self.page, "fetch already in flight");
            return None;
        }

        let request = FetchRequest {
            id: self.next_request_id,
            mode: self.mode,
            query,
        };
        self.next_request_id = self.next_request_id.saturating_add(1);

        tracing::debug!(
            request_id = request.id,
            page = request.query.page,
            search = %request.query.search,
            mode = %request.mode,
            "issuing listing fetch"
        );

        self.status = LoadStatus::Loading;
        self.error = None;
        self.in_flight = Some(request.clone());
        Some(Effect::Fetch(request))
    }
}
