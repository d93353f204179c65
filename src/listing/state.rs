//! View mode, load status, and the snapshot handed to the UI shell.

use std::fmt;
use std::str::FromStr;

use super::error::ListingError;

/// How successive pages are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Pages are appended to a growing list (the card grid).
    #[default]
    Accumulating,
    /// One page is shown at a time (the table with a pagination footer).
    Paged,
}

impl ViewMode {
    /// Returns the name the shells use for this mode.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accumulating => "grid",
            Self::Paged => "table",
        }
    }

    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Accumulating => Self::Paged,
            Self::Paged => Self::Accumulating,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewMode {
    type Err = ListingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "grid" | "accumulating" => Ok(Self::Accumulating),
            "table" | "paged" => Ok(Self::Paged),
            other => Err(ListingError::Configuration {
                message: format!("unknown view mode '{other}' (expected grid or table)"),
            }),
        }
    }
}

/// Loading lifecycle of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch for the current query is outstanding.
    Loading,
    /// The latest fetch was applied.
    Loaded,
    /// The latest fetch failed; previous items remain visible.
    Error,
}

/// Everything the UI shell needs to render a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSnapshot<T> {
    /// Items to display, in order.
    pub items: Vec<T>,
    /// Current lifecycle state.
    pub status: LoadStatus,
    /// Message from the latest failed fetch, if any.
    pub error: Option<String>,
    /// Current page (1-based). In accumulating mode, the highest page
    /// requested so far.
    pub page: u32,
    /// Pages implied by the total count.
    pub total_pages: u32,
    /// Size of the filtered result set.
    pub total_count: usize,
    /// Whether the last fetched page was full.
    pub has_more: bool,
    /// Active presentation mode.
    pub mode: ViewMode,
    /// Whether the "previous" control is enabled.
    pub can_prev: bool,
    /// Whether the "next" control is enabled.
    pub can_next: bool,
    /// Search text as typed.
    pub search: String,
    /// Search text the listing currently reflects.
    pub settled_search: String,
    /// 1-based `(first, last)` item numbers on screen.
    pub visible_range: Option<(usize, usize)>,
}

impl<T> ListingSnapshot<T> {
    /// Returns true while a fetch is outstanding.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}
