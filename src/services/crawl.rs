use crate::domain::{RecordBuilder, SubtitleRecord};
use crate::error::{CrawlError, Result};
use crate::infrastructure::{JptvClient, ListingPage, ListingSelectors};
use crate::services::download::{DownloadPersister, Persisted};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Fetching(u64),
    Done,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages_fetched: u64,
    pub records_built: u64,
    pub records_saved: u64,
    pub records_skipped: u64,
}

/// Walks the listing from page 1 until a page comes back without rows.
pub struct CrawlService {
    client: JptvClient,
    selectors: ListingSelectors,
    builder: RecordBuilder,
    persister: DownloadPersister,
    max_pages: Option<u64>,
}

impl CrawlService {
    pub fn new(
        client: JptvClient,
        persister: DownloadPersister,
        max_pages: Option<u64>,
    ) -> Result<Self> {
        Ok(Self {
            client,
            selectors: ListingSelectors::new()?,
            builder: RecordBuilder::new(),
            persister,
            max_pages,
        })
    }

    pub async fn run(&mut self) -> Result<CrawlSummary> {
        let mut summary = CrawlSummary::default();
        let mut state = CrawlState::Fetching(1);

        while let CrawlState::Fetching(page) = state {
            if self.max_pages.is_some_and(|max| summary.pages_fetched >= max) {
                info!("Reached page limit after {} pages", summary.pages_fetched);
                break;
            }
            state = self.step(page, &mut summary).await?;
        }

        Ok(summary)
    }

    /// One fetch-extract-persist cycle for `page`, returning the next state.
    pub async fn step(&mut self, page: u64, summary: &mut CrawlSummary) -> Result<CrawlState> {
        info!("On page `{}`", page);

        let records = {
            let listing = self
                .client
                .fetch_page(page)
                .await
                .inspect_err(|e| log_failure(e, page, None))?;
            summary.pages_fetched += 1;
            self.build_records(page, &listing)?
        };

        if records.is_empty() {
            info!("0 rows returned on page `{}`, end of the subtitle listing", page);
            return Ok(CrawlState::Done);
        }
        summary.records_built += records.len() as u64;

        for (idx, record) in records.iter().enumerate() {
            let outcome = self
                .persister
                .persist(record)
                .await
                .inspect_err(|e| log_failure(e, page, Some(idx + 1)))?;

            match outcome {
                Persisted::Saved(_) => summary.records_saved += 1,
                Persisted::Skipped => summary.records_skipped += 1,
            }
        }

        Ok(CrawlState::Fetching(page + 1))
    }

    // Every row of the page is built before any download starts.
    fn build_records(&mut self, page: u64, listing: &ListingPage) -> Result<Vec<SubtitleRecord>> {
        let rows = listing
            .rows(&self.selectors)
            .inspect_err(|e| log_failure(e, page, None))?;

        if rows.is_empty() && !listing.has_table(&self.selectors) {
            warn!(
                "Page `{}` has no listing table, the session cookies may have expired",
                page
            );
        }

        let builder = &mut self.builder;
        rows.iter()
            .enumerate()
            .map(|(idx, row)| {
                row.extract()
                    .and_then(|entry| builder.build(entry))
                    .inspect_err(|e| log_failure(e, page, Some(idx + 1)))
            })
            .collect()
    }
}

fn log_failure(err: &CrawlError, page: u64, row: Option<usize>) {
    match row {
        Some(row) => error!(stage = err.stage(), page, row, "Crawl aborted: {}", err),
        None => error!(stage = err.stage(), page, "Crawl aborted: {}", err),
    }
}
