//! Location scraping.
//!
//! [`TideScraper`] ties the pieces together: it normalizes each location,
//! fetches its page, falls back to the beach-only page when the first one
//! has no tide table, and collects the daylight low tides of every location
//! into a [`ScrapeReport`].
//!
//! # Example
//!
//! ```rust,no_run
//! use lowtide_core::{HttpSource, ScrapeConfig, TideScraper};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScrapeConfig::default();
//! let scraper = TideScraper::new(HttpSource::new(config.fetch.clone())?, config);
//! let report = scraper
//!     .scrape_low_tides(&["Half Moon Bay, California".to_string()])
//!     .await?;
//! println!("{}", report.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::config::ScrapeConfig;
use crate::extract::extract_from_html;
use crate::fetch::{PageSource, location_url};
use crate::location::{NormalizedLocation, normalize};
use crate::results::{LocationFailure, LocationResult, ScrapeReport};
use crate::{LowtideError, Result};

/// Scrapes low tides for locations through a [`PageSource`].
pub struct TideScraper<S> {
    source: Arc<S>,
    config: Arc<ScrapeConfig>,
}

impl<S> Clone for TideScraper<S> {
    fn clone(&self) -> Self {
        Self { source: Arc::clone(&self.source), config: Arc::clone(&self.config) }
    }
}

impl<S: PageSource + 'static> TideScraper<S> {
    pub fn new(source: S, config: ScrapeConfig) -> Self {
        Self { source: Arc::new(source), config: Arc::new(config) }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Scrapes one location, trying the primary page and then the beach-only page.
    ///
    /// A location with no tide table on either page yields
    /// [`LocationResult::not_found`], not an error. A page missing from a
    /// `file://` mirror counts as a page without a table; only when both
    /// pages are missing does the location fail with
    /// [`LowtideError::FileNotFound`] for the primary page.
    pub async fn scrape_location(&self, location: &NormalizedLocation) -> Result<LocationResult> {
        let missing_primary = match self.scrape_page(&location.primary).await {
            Ok(Some(result)) => return Ok(result),
            Ok(None) => None,
            Err(LowtideError::FileNotFound(path)) => Some(path),
            Err(e) => return Err(e),
        };

        tracing::warn!(
            location = %location.primary,
            fallback = %location.fallback,
            "no tide table on primary page, trying beach-only name"
        );
        match self.scrape_page(&location.fallback).await {
            Ok(Some(result)) => return Ok(result),
            Ok(None) => {}
            Err(LowtideError::FileNotFound(path)) => match missing_primary {
                Some(primary) => return Err(LowtideError::FileNotFound(primary)),
                None => tracing::debug!(path = %path.display(), "beach-only page missing"),
            },
            Err(e) => return Err(e),
        }

        tracing::warn!(location = %location.primary, "no tide table found");
        Ok(LocationResult::not_found())
    }

    async fn scrape_page(&self, name: &str) -> Result<Option<LocationResult>> {
        let url = location_url(&self.config.base_url, name, &self.config.all_days_suffix)?;
        let html = self.source.fetch_page(&url).await?;

        Ok(extract_from_html(&html, &self.config.extract)?.map(LocationResult::found))
    }

    /// Scrapes every non-blank location line.
    ///
    /// All lines are normalized before anything is fetched, so a malformed
    /// line fails the whole run with [`crate::LowtideError::InputFormat`]. Once
    /// fetching starts, a location that fails is recorded in
    /// [`ScrapeReport::failures`] and the others continue.
    ///
    /// Up to `concurrency` locations are in flight at once. Results keep
    /// the input order; when two lines share a primary name the later one's
    /// result is kept.
    pub async fn scrape_low_tides(&self, locations: &[String]) -> Result<ScrapeReport> {
        let normalized = locations
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(normalize)
            .collect::<Result<Vec<_>>>()?;

        let total = normalized.len();
        let concurrency = self.config.concurrency.max(1);
        let mut outcomes: Vec<Option<(String, Result<LocationResult>)>> = (0..total).map(|_| None).collect();
        let mut pending = normalized.into_iter().enumerate();
        let mut tasks = JoinSet::new();

        loop {
            while tasks.len() < concurrency {
                let Some((index, location)) = pending.next() else {
                    break;
                };
                let scraper = self.clone();
                tasks.spawn(async move {
                    let result = scraper.scrape_location(&location).await;
                    (index, location.primary, result)
                });
            }

            match tasks.join_next().await {
                Some(Ok((index, primary, result))) => outcomes[index] = Some((primary, result)),
                Some(Err(e)) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Some(Err(e)) => tracing::warn!(error = %e, "location task cancelled"),
                None => break,
            }
        }

        let mut report = ScrapeReport::default();
        for (primary, result) in outcomes.into_iter().flatten() {
            match result {
                Ok(result) => {
                    report.results.insert(primary, result);
                }
                Err(error) => {
                    tracing::warn!(location = %primary, error = %error, "failed to scrape location");
                    report.failures.push(LocationFailure { location: primary, error });
                }
            }
        }

        tracing::info!(
            locations = total,
            scraped = report.results.len(),
            failed = report.failures.len(),
            "scrape finished"
        );
        Ok(report)
    }
}

/// Scrapes `locations` from the configured site over HTTP.
#[cfg(feature = "fetch")]
pub async fn scrape_low_tides(locations: &[String], config: ScrapeConfig) -> Result<ScrapeReport> {
    let source = crate::fetch::HttpSource::new(config.fetch.clone())?;
    TideScraper::new(source, config).scrape_low_tides(locations).await
}
