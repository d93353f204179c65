//! Listwise CLI entrypoint for browsing a searchable listing.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use listwise::listing::sample_data::{sample_contacts, sample_jobs};
use listwise::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use listwise::{
    CatalogueKind, InMemoryCatalogue, ListingError, ListingSession, ListwiseConfig, Searchable,
};
use ortho_config::OrthoConfig;
use serde::de::DeserializeOwned;
use tokio::io::BufReader;

use cli::output::ListingRow;
use cli::shell::run_shell;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ListingError> {
    let config = load_config()?;
    config.validate()?;

    match config.catalogue_kind()? {
        CatalogueKind::Jobs => {
            let catalogue = load_catalogue(&config, sample_jobs)?;
            browse(catalogue, &config).await
        }
        CatalogueKind::Contacts => {
            let catalogue = load_catalogue(&config, sample_contacts)?;
            browse(catalogue, &config).await
        }
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ListingError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ListwiseConfig, ListingError> {
    ListwiseConfig::load().map_err(|error| ListingError::Configuration {
        message: error.to_string(),
    })
}

/// Builds the catalogue from the configured dataset or the built-in sample.
fn load_catalogue<T>(
    config: &ListwiseConfig,
    sample: fn() -> Vec<T>,
) -> Result<InMemoryCatalogue<T>, ListingError>
where
    T: Searchable + Clone + Send + Sync + DeserializeOwned + 'static,
{
    let catalogue = config.dataset_path().map_or_else(
        || Ok(InMemoryCatalogue::new(sample())),
        InMemoryCatalogue::<T>::from_json_file,
    )?;
    Ok(catalogue.with_latency(config.latency()))
}

async fn browse<T>(
    catalogue: InMemoryCatalogue<T>,
    config: &ListwiseConfig,
) -> Result<(), ListingError>
where
    T: Searchable + ListingRow + Clone + PartialEq + Send + Sync + 'static,
{
    let telemetry: Arc<dyn TelemetrySink> = if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    };

    let handle = ListingSession::new(Arc::new(catalogue), config.listing_options()?)
        .with_telemetry(telemetry)
        .spawn();

    let mut stdout = io::stdout();
    run_shell(handle, BufReader::new(tokio::io::stdin()), &mut stdout).await
}
