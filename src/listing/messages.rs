//! Messages accepted by the listing controller and the effects it emits.
//!
//! Messages represent UI input, timer expiry, and fetch completions.
//! Effects are the only way the controller asks for asynchronous work; the
//! session executes them and feeds the outcome back as messages.

use tokio::time::Instant;

use super::error::ListingError;
use super::source::{PageQuery, ResultPage};
use super::state::ViewMode;

/// Messages for the listing controller.
#[derive(Debug, Clone)]
pub enum ListingMsg<T> {
    // Search
    /// The raw search text changed.
    SearchChanged {
        /// New raw text.
        text: String,
        /// When the change happened.
        at: Instant,
    },
    /// A debounce deadline elapsed.
    SettleDue {
        /// When the timer fired.
        at: Instant,
    },

    // Paged navigation
    /// Go to the previous page.
    PrevPage,
    /// Go to the next page.
    NextPage,
    /// Go to the given page, clamped to the valid range.
    GoToPage(u32),

    // Accumulation
    /// Proximity signal: true when the end of the list is about to show.
    NearEnd(bool),

    // Mode
    /// Switch to the given mode.
    SetMode(ViewMode),
    /// Switch to the other mode.
    ToggleMode,

    // Data loading
    /// Re-issue the last failed fetch.
    Retry,
    /// A fetch finished.
    FetchCompleted {
        /// Request this result answers.
        request: FetchRequest,
        /// Page or failure reported by the data source.
        result: Result<ResultPage<T>, ListingError>,
    },
}

/// A page request issued by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Monotonic identifier, unique per controller.
    pub id: u64,
    /// Mode the request was issued in.
    pub mode: ViewMode,
    /// Parameters handed to the data source.
    pub query: PageQuery,
}

/// Asynchronous work requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm (or re-arm) the debounce timer; any earlier timer is superseded.
    ScheduleSettle {
        /// When to deliver [`ListingMsg::SettleDue`].
        deadline: Instant,
    },
    /// Cancel the debounce timer.
    CancelSettle,
    /// Fetch a page and deliver [`ListingMsg::FetchCompleted`].
    Fetch(FetchRequest),
}
