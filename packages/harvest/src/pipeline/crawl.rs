//! Page fetch-and-extract loop.
//!
//! Walks listing pages in order: fetch page N, run the LLM extraction,
//! stamp provenance, validate, dedup by name, accumulate, advance. Stops
//! when the fetch layer reports no more results or the page bound is hit.
//!
//! There is no checkpointing and no retry here: a restarted run begins at
//! page 1 and relies on name dedup; transport failures propagate and end
//! the run with nothing written.

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::error::{ExtractError, Result};
use crate::pipeline::strategy::ExtractionStrategy;
use crate::traits::{
    extractor::Extractor,
    fetcher::{FetchOutcome, Fetcher},
};
use crate::types::{config::CrawlConfig, resource::CareResource};

/// Loop state. One transition, RUNNING -> DONE, on end-of-results or the
/// max-pages bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrawlState {
    Running,
    Done,
}

/// Counters from one crawl run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pages that rendered content (end-of-results pages not counted)
    pub pages_fetched: u32,

    /// Raw records the LLM returned across all pages
    pub records_extracted: usize,

    /// Records that survived validation and dedup
    pub records_kept: usize,

    /// Records dropped for missing required fields (or no name)
    pub discarded_incomplete: usize,

    /// Records dropped because their name was already seen
    pub discarded_duplicate: usize,
}

impl std::fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pages fetched, {} records extracted, {} kept, {} incomplete, {} duplicates",
            self.pages_fetched,
            self.records_extracted,
            self.records_kept,
            self.discarded_incomplete,
            self.discarded_duplicate
        )
    }
}

/// Result of a crawl: kept records in crawl order, plus counters.
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    /// Kept records, insertion order = crawl order
    pub records: Vec<CareResource>,

    /// Run counters
    pub report: CrawlReport,
}

/// Crawl a paginated listing and extract records from every page.
///
/// The config is validated before any network activity. Records are kept
/// only when complete (every configured required field non-empty) and when
/// their `name` has not been seen before (case-sensitive exact match,
/// first occurrence wins).
pub async fn crawl_listing<F, E>(
    config: &CrawlConfig,
    strategy: &ExtractionStrategy,
    fetcher: &F,
    extractor: &E,
) -> Result<CrawlOutcome>
where
    F: Fetcher,
    E: Extractor,
{
    config.validate()?;

    info!(
        base_url = %config.base_url,
        selector = %config.css_selector,
        model = %strategy.model,
        "crawl starting"
    );

    let mut outcome = CrawlOutcome::default();
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut page: u32 = 1;
    let mut state = CrawlState::Running;

    while state == CrawlState::Running {
        if page > config.max_pages {
            info!(max_pages = config.max_pages, "page bound reached");
            state = CrawlState::Done;
            continue;
        }

        match fetcher.fetch_page(config, page).await? {
            FetchOutcome::NoMoreResults => {
                info!(page = page, "no more results");
                state = CrawlState::Done;
            }
            FetchOutcome::Page(listing) => {
                outcome.report.pages_fetched += 1;

                // A malformed LLM response costs this page, not the run.
                let raw = match extractor.extract(&listing.text, strategy).await {
                    Ok(records) => records,
                    Err(ExtractError::MalformedResponse { reason }) => {
                        warn!(url = %listing.url, reason = %reason, "discarding malformed extraction");
                        Vec::new()
                    }
                    Err(e) => return Err(e.into()),
                };

                outcome.report.records_extracted += raw.len();
                debug!(url = %listing.url, extracted = raw.len(), "page extracted");

                for record in raw {
                    // Provenance is stamped here, never trusted from the LLM.
                    let record = record.with_source_url(&listing.url).normalize();

                    let Some(name) = record.name.clone() else {
                        outcome.report.discarded_incomplete += 1;
                        debug!(url = %listing.url, "skipping record without a name");
                        continue;
                    };

                    if !record.is_complete(&config.required_fields) {
                        outcome.report.discarded_incomplete += 1;
                        debug!(name = %name, "skipping incomplete record");
                        continue;
                    }

                    if seen_names.contains(&name) {
                        outcome.report.discarded_duplicate += 1;
                        debug!(name = %name, "skipping duplicate record");
                        continue;
                    }

                    seen_names.insert(name);
                    outcome.records.push(record);
                }

                page += 1;
            }
        }
    }

    outcome.report.records_kept = outcome.records.len();
    info!(report = %outcome.report, "crawl complete");

    Ok(outcome)
}
