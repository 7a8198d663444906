//! Bounded paginated scans over directory feeds.
//!
//! The stop and bike directories return their whole dataset in
//! offset-bounded pages and cannot filter server-side. A scan sweeps pages
//! in order, filtering each, and stops at the first of:
//! - enough candidates (3x the requested limit) to rank and truncate
//! - a short page (dataset exhausted), judged on the rows the feed sent
//!   rather than the rows that survived conversion
//! - the page-count bound
//!
//! The bound caps latency and upstream load at the cost of recall: matches
//! beyond the scan horizon are never found.

use std::future::Future;

use tracing::{debug, warn};

use crate::feeds::{FeedError, Page, PageRange};

/// Candidates to collect per requested result before stopping early.
pub const CANDIDATE_FACTOR: usize = 3;

/// Page size and page-count bound for one directory scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPlan {
    /// Rows requested per page.
    pub page_size: usize,
    /// Hard bound on pages fetched.
    pub max_pages: usize,
}

impl ScanPlan {
    /// Stop directory search: up to 5,000 rows.
    pub const STOPS: ScanPlan = ScanPlan::new(1000, 5);

    /// Bike station search: up to 3,000 rows.
    pub const BIKES: ScanPlan = ScanPlan::new(1000, 3);

    /// Stops near a location in the combined query: first 100 rows only.
    pub const NEARBY_STOPS: ScanPlan = ScanPlan::new(100, 1);

    /// Bike stations near a location in the combined query.
    pub const NEARBY_BIKES: ScanPlan = ScanPlan::new(1000, 1);

    pub const fn new(page_size: usize, max_pages: usize) -> Self {
        Self {
            page_size,
            max_pages,
        }
    }

    /// Row range of the zero-based page `index`.
    pub fn page(&self, index: usize) -> PageRange {
        let start = index * self.page_size + 1;
        PageRange {
            start,
            end: start + self.page_size - 1,
        }
    }

    /// Most rows a scan under this plan can examine.
    pub fn horizon(&self) -> usize {
        self.page_size * self.max_pages
    }
}

/// Result of a scan: matches in scan order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome<T> {
    pub matches: Vec<T>,
    pub pages_fetched: usize,
    /// Whether the scan reached the end of the dataset.
    pub exhausted: bool,
}

/// Sweep a directory feed page by page.
///
/// `fetch_page` fetches one page; `matcher` decides which rows to keep.
/// A failure on the first page is the scan's failure. A failure on a later
/// page ends the scan with what was already collected.
pub async fn scan<T, F, Fut, M>(
    plan: ScanPlan,
    limit: usize,
    mut fetch_page: F,
    matcher: M,
) -> Result<ScanOutcome<T>, FeedError>
where
    F: FnMut(PageRange) -> Fut,
    Fut: Future<Output = Result<Page<T>, FeedError>>,
    M: Fn(&T) -> bool,
{
    let wanted = limit.saturating_mul(CANDIDATE_FACTOR);
    let mut matches = Vec::new();
    let mut pages_fetched = 0;
    let mut exhausted = false;

    for index in 0..plan.max_pages {
        let range = plan.page(index);

        let page = match fetch_page(range).await {
            Ok(page) => page,
            Err(e) if pages_fetched == 0 => return Err(e),
            Err(e) => {
                warn!(
                    page = index + 1,
                    kept = matches.len(),
                    error = %e,
                    "directory page failed, keeping earlier matches"
                );
                break;
            }
        };
        pages_fetched += 1;

        let short = page.is_short(range);
        matches.extend(page.records.into_iter().filter(|row| matcher(row)));

        if short {
            exhausted = true;
            break;
        }
        if matches.len() >= wanted {
            break;
        }
    }

    debug!(
        pages_fetched,
        matches = matches.len(),
        exhausted,
        "directory scan complete"
    );

    Ok(ScanOutcome {
        matches,
        pages_fetched,
        exhausted,
    })
}
