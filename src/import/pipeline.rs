//! Import pipeline orchestration
//!
//! This module contains the pagination loop that pulls listings from the
//! directory, filters them by provenance, transforms them into project
//! records, and inserts them one at a time. Inserts are best-effort: a
//! failing record is recorded and skipped, never aborting the run. The
//! run itself never returns an error; terminal failures surface through
//! the progress channel and the returned summary.

use std::time::Duration;

use tokio::sync::watch;

use crate::config::Config;
use crate::import::progress::{CancelHandle, ImportProgress, ProgressPublisher};
use crate::import::transform::to_project_record;
use crate::source::{DirectoryClient, PAGE_SIZE};
use crate::storage::ProjectStore;
use crate::Result;

/// Working estimate of the directory's size, used for the progress display
/// until the true count arrives with the first metadata fetch.
const ESTIMATED_TOTAL_LISTINGS: u64 = 1000;

/// A single record the store rejected during a run
#[derive(Debug, Clone)]
pub struct InsertFailure {
    pub name: String,
    pub error: String,
}

/// Outcome of one import run
#[derive(Debug, Default)]
pub struct ImportSummary {
    /// Pages successfully fetched
    pub pages_fetched: u64,

    /// Raw listings seen across all fetched pages
    pub listings_seen: u64,

    /// Listings that passed the provenance filter
    pub listings_matched: u64,

    /// Records successfully inserted
    pub total_imported: u64,

    /// Records the store rejected; the run continued past each of these
    pub failures: Vec<InsertFailure>,

    /// Terminal error, if the run stopped on one
    pub error: Option<String>,
}

/// Outcome of a single-page diagnostic probe
#[derive(Debug)]
pub struct ProbeReport {
    /// Total listing count reported by the directory
    pub total_count: u64,

    /// Raw listing count on the first page
    pub first_page_count: usize,

    /// Listings on the first page that passed the provenance filter
    pub github_count: usize,

    /// Whether the temporary probe insert succeeded (and was removed again)
    pub probe_inserted: bool,

    /// Name of the listing used for the probe insert
    pub sample_name: Option<String>,
}

/// Number of pages needed for `total` listings at the remote page size
pub(crate) fn page_count(total: u64) -> u64 {
    total.div_ceil(PAGE_SIZE)
}

/// The import pipeline
///
/// Generic over the project store so tests can substitute failing or
/// recording stores. `run` takes `&mut self`, so a harvester can only ever
/// drive one run at a time.
pub struct Harvester<S: ProjectStore> {
    config: Config,
    client: DirectoryClient,
    store: S,
    progress: ProgressPublisher,
    cancel: CancelHandle,
}

impl<S: ProjectStore> Harvester<S> {
    /// Creates a harvester from a validated configuration and an open store
    pub fn new(config: Config, store: S) -> Result<Self> {
        let client = DirectoryClient::new(&config.source)?;
        Ok(Self {
            config,
            client,
            store,
            progress: ProgressPublisher::new(),
            cancel: CancelHandle::default(),
        })
    }

    /// Subscribes to progress snapshots for the current and future runs
    pub fn subscribe(&self) -> watch::Receiver<ImportProgress> {
        self.progress.subscribe()
    }

    /// Returns a handle that can stop a run at the next page boundary
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the harvester and returns the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Runs one full import
    ///
    /// Never returns an error: transport failures, exhaustion, and per-record
    /// insert failures are all captured in the returned [`ImportSummary`] and
    /// mirrored on the progress channel.
    pub async fn run(&mut self) -> ImportSummary {
        let mut summary = ImportSummary::default();

        self.cancel.reset();
        self.progress.reset();
        self.progress.update(|p| {
            p.is_running = true;
            p.total_pages = page_count(ESTIMATED_TOTAL_LISTINGS);
            p.message = "Starting directory import...".to_string();
        });
        tracing::info!("Starting directory import from {}", self.config.source.base_url);

        // Learn the true listing count from the page 0 metadata
        let total_pages = match self.client.fetch_page(0).await {
            Ok(page) => {
                let pages = page_count(page.total_count);
                tracing::info!(
                    "Directory reports {} listings across {} pages",
                    page.total_count,
                    pages
                );
                self.progress.update(|p| {
                    p.total_pages = pages;
                    p.message = format!("Found {} listings, starting import...", page.total_count);
                });
                pages
            }
            Err(error) => {
                let message = error.to_string();
                tracing::error!("Failed to fetch directory metadata: {}", message);
                self.progress.update(|p| {
                    p.error = Some(message.clone());
                    p.is_running = false;
                });
                summary.error = Some(message);
                return summary;
            }
        };

        let mut cancelled = false;
        let mut page: u64 = 0;
        while page < total_pages {
            if self.cancel.is_cancelled() {
                tracing::info!("Cancellation requested, stopping before page {}", page + 1);
                cancelled = true;
                break;
            }

            self.progress.update(|p| {
                p.current_page = page + 1;
                p.message = format!("Processing page {} of {}...", page + 1, total_pages);
            });

            let listing_page = match self.client.fetch_page(page).await {
                Ok(fetched) => fetched,
                Err(error) => {
                    let message = error.to_string();
                    tracing::error!("Failed to fetch page {}: {}", page + 1, message);
                    self.progress.update(|p| p.error = Some(message.clone()));
                    summary.error = Some(message);
                    break;
                }
            };
            summary.pages_fetched += 1;

            // An empty page means the directory is exhausted
            if listing_page.listings.is_empty() {
                tracing::info!("No more listings found, stopping import");
                self.progress
                    .update(|p| p.message = "No more listings found, import complete".to_string());
                break;
            }

            let fetched_count = listing_page.listings.len();
            summary.listings_seen += fetched_count as u64;
            self.progress.update(|p| {
                p.current_page_listings = fetched_count;
                p.message = format!("Found {} listings on page {}", fetched_count, page + 1);
            });

            let mut imported_this_page: u64 = 0;
            for listing in listing_page
                .listings
                .iter()
                .filter(|listing| listing.is_github_sourced())
            {
                summary.listings_matched += 1;
                let record = to_project_record(listing);
                match self.store.insert_project(&record) {
                    Ok(_) => imported_this_page += 1,
                    Err(error) => {
                        tracing::warn!("Failed to insert project {}: {}", record.name, error);
                        summary.failures.push(InsertFailure {
                            name: record.name,
                            error: error.to_string(),
                        });
                    }
                }
            }

            if imported_this_page > 0 {
                summary.total_imported += imported_this_page;
                let total_imported = summary.total_imported;
                self.progress.update(|p| {
                    p.total_imported = total_imported;
                    p.message = format!("Imported {} projects so far...", total_imported);
                });
                tracing::info!(
                    "Imported {} projects from page {}",
                    imported_this_page,
                    page + 1
                );
            } else {
                self.progress.update(|p| {
                    p.message = format!("No projects imported from page {}, continuing...", page + 1)
                });
            }

            page += 1;

            // Politeness throttle between page requests
            if page < total_pages && self.config.source.page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.source.page_delay_ms)).await;
            }
        }

        let closing = if cancelled {
            format!("Import cancelled after {} projects", summary.total_imported)
        } else if summary.error.is_some() {
            format!(
                "Import stopped early, {} projects imported",
                summary.total_imported
            )
        } else {
            format!("Import complete: {} projects imported", summary.total_imported)
        };
        self.progress.update(|p| {
            p.is_running = false;
            p.message = closing.clone();
        });
        tracing::info!("{}", closing);

        summary
    }

    /// Fetches the first page and attempts one temporary insert
    ///
    /// Diagnostic helper for checking source reachability and store schema
    /// compatibility without importing anything: the probe row is deleted
    /// again immediately after a successful insert.
    pub async fn probe(&mut self) -> Result<ProbeReport> {
        let page = self.client.fetch_page(0).await?;

        let github: Vec<_> = page
            .listings
            .iter()
            .filter(|listing| listing.is_github_sourced())
            .collect();

        let mut report = ProbeReport {
            total_count: page.total_count,
            first_page_count: page.listings.len(),
            github_count: github.len(),
            probe_inserted: false,
            sample_name: None,
        };
        tracing::info!(
            "Probe: {} total listings, {} on first page, {} from GitHub",
            report.total_count,
            report.first_page_count,
            report.github_count
        );

        if let Some(listing) = github.first() {
            let record = to_project_record(listing);
            report.sample_name = Some(record.name.clone());
            match self.store.insert_project(&record) {
                Ok(id) => {
                    report.probe_inserted = true;
                    tracing::info!(
                        "Probe insert succeeded for {}, removing probe row",
                        record.name
                    );
                    self.store.delete_project(id)?;
                }
                Err(error) => {
                    tracing::error!("Probe insert failed for {}: {}", record.name, error);
                }
            }
        }

        Ok(report)
    }
}
