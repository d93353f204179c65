//! Built-in sample catalogues used when no dataset file is configured.

use chrono::NaiveDate;

use super::models::{Contact, Job, PresenceStatus};

/// `(title, company, location, salary, type, posted day in March 2025)`.
const JOBS: &[(&str, &str, &str, &str, &str, u32)] = &[
    (
        "Senior Frontend Developer",
        "TechCorp",
        "San Francisco, CA",
        "$120k - $150k",
        "Full-time",
        28,
    ),
    ("Backend Engineer", "DataFlow Inc", "Remote", "$110k - $140k", "Full-time", 27),
    ("Product Designer", "Pixel Studio", "New York, NY", "$95k - $120k", "Full-time", 27),
    ("DevOps Engineer", "CloudNine", "Austin, TX", "$115k - $145k", "Full-time", 26),
    ("Data Scientist", "Insight Analytics", "Boston, MA", "$130k - $160k", "Full-time", 26),
    ("Mobile Developer", "AppWorks", "Seattle, WA", "$105k - $135k", "Contract", 25),
    ("QA Automation Engineer", "TestRight", "Remote", "$90k - $115k", "Full-time", 25),
    ("Technical Writer", "DocuMentor", "Chicago, IL", "$75k - $95k", "Part-time", 24),
    ("Site Reliability Engineer", "UptimeHQ", "Denver, CO", "$125k - $155k", "Full-time", 24),
    ("UX Researcher", "Pixel Studio", "Remote", "$90k - $110k", "Contract", 23),
    ("Full Stack Developer", "TechCorp", "Remote", "$110k - $140k", "Full-time", 22),
    ("Machine Learning Engineer", "NeuralPath", "San Jose, CA", "$140k - $180k", "Full-time", 22),
    ("Security Analyst", "ShieldSec", "Washington, DC", "$100k - $130k", "Full-time", 21),
    ("Engineering Manager", "DataFlow Inc", "Remote", "$160k - $190k", "Full-time", 20),
    ("Rust Systems Engineer", "Ferrous Labs", "Berlin, DE", "€85k - €110k", "Full-time", 20),
    ("Database Administrator", "StoreMax", "Atlanta, GA", "$95k - $120k", "Full-time", 19),
    ("Cloud Architect", "CloudNine", "Remote", "$150k - $185k", "Full-time", 18),
    ("Frontend Intern", "TechCorp", "San Francisco, CA", "$30/hr", "Internship", 18),
    ("Support Engineer", "HelpDeskPro", "Remote", "$65k - $80k", "Full-time", 17),
    ("Game Developer", "PlayForge", "Los Angeles, CA", "$100k - $125k", "Full-time", 16),
    ("Blockchain Developer", "ChainLink Labs", "Remote", "$130k - $165k", "Contract", 15),
    (
        "Embedded Software Engineer",
        "Ferrous Labs",
        "Munich, DE",
        "€75k - €95k",
        "Full-time",
        14,
    ),
    ("Scrum Master", "AgileWorks", "Remote", "$90k - $115k", "Part-time", 13),
];

/// `(name, email, status)`.
const CONTACTS: &[(&str, &str, PresenceStatus)] = &[
    ("Alice Johnson", "alice@example.com", PresenceStatus::Online),
    ("Bob Smith", "bob@example.com", PresenceStatus::Away),
    ("Carol White", "carol@example.com", PresenceStatus::Offline),
    ("David Brown", "david@example.com", PresenceStatus::Online),
    ("Eve Davis", "eve@example.com", PresenceStatus::Offline),
    ("Frank Miller", "frank@example.com", PresenceStatus::Away),
];

/// Returns the built-in job board catalogue.
#[must_use]
pub fn sample_jobs() -> Vec<Job> {
    JOBS.iter()
        .zip(1_u32..)
        .map(
            |(&(title, company, location, salary, employment_type, day), id)| Job {
                id: id.to_string(),
                title: title.to_owned(),
                company: company.to_owned(),
                location: location.to_owned(),
                salary: salary.to_owned(),
                employment_type: employment_type.to_owned(),
                posted_date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap_or_default(),
                description: format!("{company} is hiring a {title} to join the team."),
            },
        )
        .collect()
}

/// Returns the built-in contact list.
#[must_use]
pub fn sample_contacts() -> Vec<Contact> {
    CONTACTS
        .iter()
        .zip(1_u32..)
        .map(|(&(name, email, status), id)| Contact {
            id: id.to_string(),
            name: name.to_owned(),
            email: email.to_owned(),
            status,
        })
        .collect()
}
