//! Page arithmetic for listing results.
//!
//! `PageInfo` captures the current position within a filtered result set and
//! answers the navigation questions the pagination footer asks. The total
//! count reported by the data source is authoritative; the page count is
//! always derived from it.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Returns `ceil(total_count / page_size)`.
#[must_use]
pub fn total_pages(total_count: usize, page_size: NonZeroUsize) -> u32 {
    u32::try_from(total_count.div_ceil(page_size.get())).unwrap_or(u32::MAX)
}

/// Clamps a requested page into `[1, max(1, total_pages)]`.
#[must_use]
pub fn clamp_page(requested: u32, total_pages: u32) -> u32 {
    requested.clamp(1, total_pages.max(1))
}

/// Returns the item index range `[(page-1)*size, page*size)` for a page.
///
/// Page 0 is treated as page 1.
#[must_use]
pub fn page_bounds(page: u32, page_size: NonZeroUsize) -> Range<usize> {
    let index = usize::try_from(page.max(1).saturating_sub(1)).unwrap_or(usize::MAX);
    let start = index.saturating_mul(page_size.get());
    start..start.saturating_add(page_size.get())
}

/// Current page state for a listing.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use listwise::listing::pagination::PageInfo;
///
/// let size = NonZeroUsize::new(10).expect("non-zero");
/// let info = PageInfo::new(3, size, 23);
/// assert_eq!(info.total_pages(), 3);
/// assert!(info.is_last_page());
/// assert_eq!(info.displayed_range(3), Some((21, 23)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page number (1-based).
    current_page: u32,
    /// Items per page.
    page_size: NonZeroUsize,
    /// Size of the filtered result set.
    total_count: usize,
}

impl PageInfo {
    /// Creates a new page info instance.
    #[must_use]
    pub const fn new(current_page: u32, page_size: NonZeroUsize, total_count: usize) -> Self {
        Self {
            current_page,
            page_size,
            total_count,
        }
    }

    /// Returns the current page number (1-based).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Returns the size of the filtered result set.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the number of pages implied by the total count.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count, self.page_size)
    }

    /// Clamps `requested` to the valid page range.
    #[must_use]
    pub fn clamp(&self, requested: u32) -> u32 {
        clamp_page(requested, self.total_pages())
    }

    /// Returns true if this is the first page.
    #[must_use]
    pub const fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    /// Returns true if no page exists after the current one.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages()
    }

    /// Returns true if pages exist before the current one.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        !self.is_first_page()
    }

    /// Returns true if pages exist after the current one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.is_last_page()
    }

    /// Returns the 1-based `(first, last)` item numbers shown on this page.
    ///
    /// `shown` is the number of items actually displayed. Returns `None` when
    /// nothing is shown.
    #[must_use]
    pub fn displayed_range(&self, shown: usize) -> Option<(usize, usize)> {
        if shown == 0 {
            return None;
        }
        let first = page_bounds(self.current_page, self.page_size)
            .start
            .saturating_add(1);
        Some((first, first.saturating_add(shown).saturating_sub(1)))
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, 0)
    }
}
