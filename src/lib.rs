//! Listwise library crate providing searchable, paged listings.
//!
//! The library holds the listing query controller, a synchronous state
//! machine that debounces search text, tracks page and view mode, and
//! discards fetch results that no longer answer its latest request. A tokio
//! session drives the controller against any [`ListingSource`], publishing
//! snapshots a UI shell can render.

pub mod config;
pub mod listing;
pub mod telemetry;

pub use config::{CatalogueKind, ListwiseConfig};
pub use listing::{
    Contact, InMemoryCatalogue, Job, ListingController, ListingError, ListingHandle,
    ListingInput, ListingOptions, ListingSession, ListingSnapshot, ListingSource, LoadStatus,
    PageInfo, PageQuery, PresenceStatus, ResultPage, Searchable, ViewMode,
};
