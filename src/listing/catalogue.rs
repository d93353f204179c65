//! In-memory listing source with simulated latency.
//!
//! `InMemoryCatalogue` answers page queries from a fixed vector of items. It
//! optionally sleeps before answering so that shells and tests can observe
//! loading states and out-of-order completions the way a slow backend would
//! produce them.

use std::time::Duration;

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::de::DeserializeOwned;

use super::error::ListingError;
use super::models::Searchable;
use super::pagination::page_bounds;
use super::source::{ListingSource, PageQuery, ResultPage};

/// Latency applied by the shells when none is configured.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// A [`ListingSource`] backed by an in-memory vector.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogue<T> {
    items: Vec<T>,
    latency: Duration,
}

impl<T> InMemoryCatalogue<T>
where
    T: Searchable + Clone + Send + Sync + 'static,
{
    /// Creates a catalogue that answers immediately.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self {
            items,
            latency: Duration::ZERO,
        }
    }

    /// Sets the delay applied before every answer.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Returns the number of items in the catalogue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the catalogue holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Filters and slices the catalogue synchronously.
    ///
    /// Page 0 is answered as page 1.
    #[must_use]
    pub fn query(&self, query: &PageQuery) -> ResultPage<T> {
        let page = query.page.max(1);
        let filtered: Vec<&T> = self
            .items
            .iter()
            .filter(|item| item.matches_search(&query.search))
            .collect();
        let total_count = filtered.len();
        let bounds = page_bounds(page, query.page_size);
        let items = filtered
            .into_iter()
            .skip(bounds.start)
            .take(bounds.len())
            .cloned()
            .collect();

        ResultPage {
            items,
            total_count,
            page,
        }
    }
}

impl<T> InMemoryCatalogue<T>
where
    T: Searchable + Clone + Send + Sync + DeserializeOwned + 'static,
{
    /// Loads a catalogue from a JSON array stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Dataset`] when the file cannot be opened,
    /// read, or parsed as a JSON array of items.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self, ListingError> {
        let parent = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = path.file_name().ok_or_else(|| ListingError::Dataset {
            message: format!("invalid dataset path '{path}': no file name"),
        })?;

        let dir =
            Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
                ListingError::Dataset {
                    message: format!("failed to open dataset directory '{parent}': {error}"),
                }
            })?;
        let content = dir
            .read_to_string(file_name)
            .map_err(|error| ListingError::Dataset {
                message: format!("failed to read dataset '{path}': {error}"),
            })?;

        let items: Vec<T> =
            serde_json::from_str(&content).map_err(|error| ListingError::Dataset {
                message: format!("failed to parse dataset '{path}': {error}"),
            })?;

        Ok(Self::new(items))
    }
}

#[async_trait]
impl<T> ListingSource for InMemoryCatalogue<T>
where
    T: Searchable + Clone + Send + Sync + 'static,
{
    type Item = T;

    async fn fetch(&self, query: &PageQuery) -> Result<ResultPage<T>, ListingError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.query(query))
    }
}
