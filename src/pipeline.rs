use crate::error::{Result, ScraperError};
use crate::gateway::Gateway;
use crate::scraper::{DetailRecord, ListingRecord, ParseOptions, Scraper};
use crate::{log_debug, log_info, log_warn};
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::HashMap;

/// Ids per detail request. The proxy puts them all in one query string.
pub const DEFAULT_BATCH_SIZE: usize = 40;

/// A listing row joined with its detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPosting {
    #[serde(flatten)]
    pub listing: ListingRecord,
    #[serde(flatten)]
    pub details: DetailRecord,
}

impl JobPosting {
    pub fn id(&self) -> &str {
        &self.listing.id
    }
}

#[derive(Debug, Default)]
struct BatchOutcome {
    details: HashMap<String, DetailRecord>,
    pages: usize,
    failures: usize,
    /// Failures where the page did not have the paragraph layout at all.
    layout_failures: usize,
}

impl BatchOutcome {
    fn merge(mut self, other: BatchOutcome) -> Self {
        self.details.extend(other.details);
        self.pages += other.pages;
        self.failures += other.failures;
        self.layout_failures += other.layout_failures;
        self
    }
}

pub struct JobBoard<G> {
    gateway: G,
    batch_size: usize,
    options: ParseOptions,
}

impl<G: Gateway> JobBoard<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            batch_size: DEFAULT_BATCH_SIZE,
            options: ParseOptions::default(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Fetches the listing and every detail page, and returns one posting per
    /// listing row whose detail page parsed, in listing order.
    ///
    /// Fails when the listing has a malformed row, when any fetch fails, or
    /// when detail pages came back and none of them had the expected layout.
    /// Rows sharing an id each get a copy of that id's details.
    pub async fn load_job_postings(&self) -> Result<Vec<JobPosting>> {
        let listing_html = self.gateway.fetch_listing().await?;
        let listings = Scraper::new(&listing_html).listing().parse_table()?;
        log_info!("[pipeline] Listing has {} postings", listings.len());

        let ids: Vec<String> = listings.iter().map(|record| record.id.clone()).collect();
        let details = self.load_details(&ids).await?;

        let total = listings.len();
        let postings: Vec<JobPosting> = listings
            .into_iter()
            .filter_map(|listing| match details.get(&listing.id) {
                Some(details) => Some(JobPosting {
                    listing,
                    details: details.clone(),
                }),
                None => {
                    log_debug!("[pipeline] No details for {}, dropping it", listing.id);
                    None
                }
            })
            .collect();

        log_info!(
            "[pipeline] Loaded {} of {} postings",
            postings.len(),
            total
        );
        Ok(postings)
    }

    /// All batches are requested together; each one parses its own pages
    /// into its own map and the maps are merged once every batch is back.
    async fn load_details(&self, ids: &[String]) -> Result<HashMap<String, DetailRecord>> {
        let batches: Vec<&[String]> = ids.chunks(self.batch_size).collect();
        log_info!(
            "[pipeline] Requesting {} detail pages in {} batches",
            ids.len(),
            batches.len()
        );

        let outcomes = try_join_all(
            batches
                .into_iter()
                .enumerate()
                .map(|(index, batch)| self.load_batch(index, batch)),
        )
        .await?;

        let outcome = outcomes
            .into_iter()
            .fold(BatchOutcome::default(), BatchOutcome::merge);

        if outcome.pages > 0 && outcome.layout_failures == outcome.pages {
            return Err(ScraperError::LayoutChanged {
                failed: outcome.layout_failures,
                total: outcome.pages,
            }
            .into());
        }

        if outcome.failures > 0 {
            log_warn!(
                "[pipeline] {} of {} detail pages failed to parse",
                outcome.failures,
                outcome.pages
            );
        }

        Ok(outcome.details)
    }

    async fn load_batch(&self, index: usize, batch: &[String]) -> Result<BatchOutcome> {
        let pages = self.gateway.fetch_details(batch).await?;
        log_debug!(
            "[pipeline] Batch {}: {} ids requested, {} pages returned",
            index,
            batch.len(),
            pages.len()
        );

        let mut outcome = BatchOutcome {
            pages: pages.len(),
            ..Default::default()
        };

        for (id, html) in pages {
            match Scraper::new(&html).details(self.options).parse_details() {
                Ok(record) => {
                    outcome.details.insert(id, record);
                }
                Err(e) => {
                    log_warn!("[pipeline] Skipping posting {}: {}", id, e);
                    if matches!(e, ScraperError::MissingParagraphs { .. }) {
                        outcome.layout_failures += 1;
                    }
                    outcome.failures += 1;
                }
            }
        }

        Ok(outcome)
    }
}
