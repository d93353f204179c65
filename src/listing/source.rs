//! Data source contract for paged listing queries.
//!
//! The controller never touches a backing store directly. It asks a
//! [`ListingSource`] for one page at a time, which keeps it testable with
//! mocks and lets the shells plug in whatever catalogue they render.

use std::num::NonZeroUsize;

use async_trait::async_trait;

use super::error::ListingError;

/// Parameters for a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Settled search text; empty means "no filter".
    pub search: String,
    /// Page number to fetch (1-based).
    pub page: u32,
    /// Items per page.
    pub page_size: NonZeroUsize,
}

impl PageQuery {
    /// Creates a query for `page` of the results matching `search`.
    #[must_use]
    pub fn new(search: impl Into<String>, page: u32, page_size: NonZeroUsize) -> Self {
        Self {
            search: search.into(),
            page,
            page_size,
        }
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPage<T> {
    /// Items on this page, at most `page_size` of them.
    pub items: Vec<T>,
    /// Size of the whole filtered set, before slicing.
    pub total_count: usize,
    /// Page these items belong to.
    pub page: u32,
}

impl<T> ResultPage<T> {
    /// Returns an empty first page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page: 1,
        }
    }
}

/// Source that can answer paged, filtered listing queries.
#[cfg_attr(test, mockall::automock(type Item = crate::listing::models::Job;))]
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Item type produced by this source.
    type Item: Clone + Send + Sync + 'static;

    /// Fetch one page of items matching the query.
    async fn fetch(&self, query: &PageQuery) -> Result<ResultPage<Self::Item>, ListingError>;
}
