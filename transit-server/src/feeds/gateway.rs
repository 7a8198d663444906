//! Time-bounded single fetches against an upstream feed.

use std::fmt;
use std::time::{Duration, Instant};

use reqwest::Url;
use tracing::{debug, warn};

use super::error::FeedError;

/// Default wall-clock budget for one fetch.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(10);

/// How much of an error body to keep for diagnostics.
const ERROR_BODY_CHARS: usize = 500;

/// Which upstream a fetch is for. Used for logging instead of the URL,
/// since feed URLs carry API keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    RailArrival,
    RailPosition,
    BusArrival,
    StopDirectory,
    BikeDirectory,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feed::RailArrival => "rail-arrival",
            Feed::RailPosition => "rail-position",
            Feed::BusArrival => "bus-arrival",
            Feed::StopDirectory => "stop-directory",
            Feed::BikeDirectory => "bike-directory",
        };
        f.write_str(name)
    }
}

/// Issues single GET requests with a hard time budget.
///
/// There are no retries here: a failed or timed-out fetch is terminal for
/// that call.
#[derive(Debug, Clone)]
pub struct FeedGateway {
    http: reqwest::Client,
    budget: Duration,
}

impl FeedGateway {
    /// Create a gateway whose fetches are bounded by `budget`.
    pub fn new(budget: Duration) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, budget })
    }

    /// Fetch `url` and return the raw body.
    ///
    /// On expiry the in-flight request future is dropped, which cancels it
    /// and releases its connection; the timer is owned by the same
    /// `timeout` future, so nothing outlives this call on any path.
    pub async fn fetch(&self, feed: Feed, url: Url) -> Result<String, FeedError> {
        let started = Instant::now();

        let request = async {
            let response = self.http.get(url).send().await?;
            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(FeedError::Status {
                    status: status.as_u16(),
                    body: clip(&body),
                });
            }

            Ok(response.text().await?)
        };

        let result = match tokio::time::timeout(self.budget, request).await {
            Ok(result) => result,
            Err(_) => Err(FeedError::Timeout {
                budget: self.budget,
            }),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(body) => debug!(%feed, elapsed_ms, bytes = body.len(), "feed fetched"),
            Err(e) => warn!(%feed, elapsed_ms, error = %e, "feed fetch failed"),
        }

        result
    }
}

/// Keep the first few hundred characters of a body for error messages.
pub(crate) fn clip(body: &str) -> String {
    body.chars().take(ERROR_BODY_CHARS).collect()
}
