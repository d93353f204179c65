//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.listwise.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `LISTWISE_PAGE_SIZE`, `LISTWISE_VIEW`, ...
//! 4. **Command-line arguments** – `--page-size`/`-p`, `--view`/`-v`, ...
//!
//! # Configuration File
//!
//! ```toml
//! page_size = 10
//! debounce_ms = 500
//! latency_ms = 500
//! view = "table"
//! search = "engineer"
//! catalogue = "jobs"
//! dataset = "jobs.json"
//! telemetry = true
//! ```

use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use camino::Utf8Path;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::listing::pagination::DEFAULT_PAGE_SIZE;
use crate::listing::{ListingError, ListingOptions, ViewMode};

const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_LATENCY_MS: u64 = 500;

/// Which built-in catalogue kind the shell lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogueKind {
    /// Job openings, searched by title and company.
    #[default]
    Jobs,
    /// Messaging contacts, searched by name and email.
    Contacts,
}

impl FromStr for CatalogueKind {
    type Err = ListingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jobs" => Ok(Self::Jobs),
            "contacts" => Ok(Self::Contacts),
            other => Err(ListingError::Configuration {
                message: format!("unknown catalogue '{other}' (expected jobs or contacts)"),
            }),
        }
    }
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use listwise::ListwiseConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = ListwiseConfig::load().expect("failed to load configuration");
/// let options = config.listing_options().expect("valid listing options");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "LISTWISE",
    discovery(
        dotfile_name = ".listwise.toml",
        config_file_name = "listwise.toml",
        app_name = "listwise"
    )
)]
pub struct ListwiseConfig {
    /// Items per page.
    ///
    /// Can be provided via:
    /// - CLI: `--page-size <N>` or `-p <N>`
    /// - Environment: `LISTWISE_PAGE_SIZE`
    /// - Config file: `page_size = 10`
    #[ortho_config(cli_short = 'p')]
    pub page_size: usize,

    /// Quiescence window applied to search text, in milliseconds.
    #[ortho_config()]
    pub debounce_ms: u64,

    /// Simulated data source latency, in milliseconds.
    #[ortho_config()]
    pub latency_ms: u64,

    /// Initial view: `grid` (accumulating) or `table` (paged).
    ///
    /// Can be provided via:
    /// - CLI: `--view <VIEW>` or `-v <VIEW>`
    /// - Environment: `LISTWISE_VIEW`
    /// - Config file: `view = "table"`
    #[ortho_config(cli_short = 'v')]
    pub view: Option<String>,

    /// Search text in effect at startup.
    #[ortho_config(cli_short = 's')]
    pub search: Option<String>,

    /// Catalogue to list: `jobs` or `contacts`.
    #[ortho_config()]
    pub catalogue: Option<String>,

    /// Path to a JSON array of items replacing the built-in catalogue.
    #[ortho_config()]
    pub dataset: Option<String>,

    /// Writes telemetry events to stderr as JSON lines.
    ///
    /// Note: boolean values are not loaded from the environment.
    #[ortho_config(cli_short = 't')]
    pub telemetry: bool,
}

impl Default for ListwiseConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.get(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            latency_ms: DEFAULT_LATENCY_MS,
            view: None,
            search: None,
            catalogue: None,
            dataset: None,
            telemetry: false,
        }
    }
}

impl ListwiseConfig {
    /// Validates that every configured value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Configuration`] for a zero page size or an
    /// unknown view or catalogue name.
    pub fn validate(&self) -> Result<(), ListingError> {
        self.page_size()?;
        self.view_mode()?;
        self.catalogue_kind()?;
        Ok(())
    }

    /// Returns the page size.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Configuration`] when the page size is zero.
    pub fn page_size(&self) -> Result<NonZeroUsize, ListingError> {
        NonZeroUsize::new(self.page_size).ok_or_else(|| ListingError::Configuration {
            message: "page size must be at least 1 (use --page-size or -p)".to_owned(),
        })
    }

    /// Returns the initial view mode, defaulting to the grid.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Configuration`] for an unknown view name.
    pub fn view_mode(&self) -> Result<ViewMode, ListingError> {
        self.view
            .as_deref()
            .map_or(Ok(ViewMode::default()), ViewMode::from_str)
    }

    /// Returns the catalogue kind, defaulting to jobs.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Configuration`] for an unknown catalogue name.
    pub fn catalogue_kind(&self) -> Result<CatalogueKind, ListingError> {
        self.catalogue
            .as_deref()
            .map_or(Ok(CatalogueKind::default()), CatalogueKind::from_str)
    }

    /// Returns the configured dataset path, if any.
    #[must_use]
    pub fn dataset_path(&self) -> Option<&Utf8Path> {
        self.dataset.as_deref().map(Utf8Path::new)
    }

    /// Returns the simulated data source latency.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Builds controller options from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Configuration`] when validation fails.
    pub fn listing_options(&self) -> Result<ListingOptions, ListingError> {
        Ok(ListingOptions::default()
            .with_page_size(self.page_size()?)
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_mode(self.view_mode()?)
            .with_initial_search(self.search.clone().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests;
