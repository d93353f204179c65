//! Error types exposed by the listing layer.

use thiserror::Error;

/// Errors surfaced while loading listing data or preparing a session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListingError {
    /// The data source could not answer a page request.
    #[error("failed to fetch listing page: {message}")]
    FetchFailed {
        /// Detail reported by the data source.
        message: String,
    },

    /// The listing session has stopped and no longer accepts input.
    #[error("listing session is closed")]
    SessionClosed,

    /// A dataset file could not be read or parsed.
    #[error("dataset error: {message}")]
    Dataset {
        /// Details about the dataset failure.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl ListingError {
    /// Builds a [`ListingError::FetchFailed`] from any displayable cause.
    #[must_use]
    pub fn fetch_failed(cause: impl std::fmt::Display) -> Self {
        Self::FetchFailed {
            message: cause.to_string(),
        }
    }
}
