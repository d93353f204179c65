//! Test helpers for constructing listing item fixtures.
//!
//! # Examples
//!
//! ```
//! use listwise::listing::models::test_support::{job, numbered_jobs};
//!
//! let single = job(1, "Rust Engineer", "Ferrous Labs");
//! assert_eq!(single.id, "1");
//!
//! let many = numbered_jobs(23);
//! assert_eq!(many.len(), 23);
//! ```

use chrono::NaiveDate;

use super::{Contact, Job, PresenceStatus};

/// Constructs a job with the given title and company.
///
/// Remaining fields hold fixed placeholder values.
#[must_use]
pub fn job(id: u32, title: &str, company: &str) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_owned(),
        company: company.to_owned(),
        location: "Berlin".to_owned(),
        salary: "€70k".to_owned(),
        employment_type: "Full-time".to_owned(),
        posted_date: NaiveDate::default(),
        description: String::new(),
    }
}

/// Constructs `count` jobs titled `Job 1`, `Job 2`, ... at `Company N`.
#[must_use]
pub fn numbered_jobs(count: u32) -> Vec<Job> {
    (1..=count)
        .map(|n| job(n, &format!("Job {n}"), &format!("Company {n}")))
        .collect()
}

/// Constructs a contact with the given name and email.
#[must_use]
pub fn contact(id: u32, name: &str, email: &str) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_owned(),
        email: email.to_owned(),
        status: PresenceStatus::Online,
    }
}
