//! Listing item models and the search matching contract.
//!
//! Items advertise the text fields a search should look at through the
//! [`Searchable`] trait. Matching is a case-insensitive substring test across
//! those fields, which is what both the job board and the contact sidebar
//! expect from their search boxes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// An item that can be filtered by free-text search.
pub trait Searchable {
    /// Returns the fields that search text is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Returns true when any search field contains `needle`, ignoring case.
    ///
    /// An empty needle matches every item.
    fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let lowered = needle.to_lowercase();
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&lowered))
    }
}

/// A job opening shown on the job board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Stable identifier.
    pub id: String,
    /// Role title, e.g. "Senior Rust Engineer".
    pub title: String,
    /// Hiring company.
    pub company: String,
    /// Office location or "Remote".
    pub location: String,
    /// Advertised salary band as free text.
    pub salary: String,
    /// Employment type, e.g. "Full-time".
    #[serde(rename = "type")]
    pub employment_type: String,
    /// Date the listing was posted.
    pub posted_date: NaiveDate,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
}

impl Searchable for Job {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.company.as_str()]
    }
}

/// Presence reported for a contact in the messaging sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    /// Currently connected.
    Online,
    /// Connected but idle.
    Away,
    /// Not connected.
    #[default]
    Offline,
}

impl PresenceStatus {
    /// Returns a short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Away => "away",
            Self::Offline => "offline",
        }
    }
}

/// A conversation partner listed in the messaging sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Current presence.
    #[serde(default)]
    pub status: PresenceStatus,
}

impl Searchable for Contact {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}
