//! Searchable, paged listings.
//!
//! This module holds the listing query controller together with the pieces
//! it is built from: the debounce primitive, the data source contract, page
//! arithmetic, and the async session that runs the controller on tokio.
//! Views never mutate listing state directly; they send input and render the
//! snapshots the session publishes.

pub mod catalogue;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod messages;
pub mod models;
pub mod pagination;
pub mod sample_data;
pub mod session;
pub mod source;
pub mod state;

pub use catalogue::InMemoryCatalogue;
pub use controller::{ListingController, ListingOptions};
pub use debounce::Debounce;
pub use error::ListingError;
pub use messages::{Effect, FetchRequest, ListingMsg};
pub use models::{Contact, Job, PresenceStatus, Searchable};
pub use pagination::PageInfo;
pub use session::{ListingHandle, ListingInput, ListingSession};
pub use source::{ListingSource, PageQuery, ResultPage};
pub use state::{ListingSnapshot, LoadStatus, ViewMode};
