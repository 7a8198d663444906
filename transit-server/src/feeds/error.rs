//! Feed error types.

use std::time::Duration;

/// Errors from fetching or decoding an upstream feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The request did not settle within its time budget
    #[error("upstream timed out after {}ms", budget.as_millis())]
    Timeout { budget: Duration },

    /// HTTP request failed (connect, read, TLS, ...). Holds no URL: feed
    /// URLs carry API keys.
    #[error("HTTP error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered with a non-success status code
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Upstream answered 200 but embedded an error code in the body
    #[error("upstream error {code}: {message}")]
    Payload { code: String, message: String },

    /// Body was not the JSON shape the feed documents
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// A feed URL could not be built from the configured base
    #[error("invalid feed URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        FeedError::Transport(e.without_url())
    }
}

/// Coarse classification of a feed failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    UpstreamTimeout,
    UpstreamTransport,
    UpstreamPayload,
}

impl FeedError {
    /// Classify the failure.
    ///
    /// Anything the upstream said (status codes, embedded error codes,
    /// bodies we could not decode) counts as a payload failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            FeedError::Timeout { .. } => FailureKind::UpstreamTimeout,
            FeedError::Transport(e) if e.is_timeout() => FailureKind::UpstreamTimeout,
            FeedError::Transport(_) | FeedError::InvalidUrl(_) => FailureKind::UpstreamTransport,
            FeedError::Status { .. } | FeedError::Payload { .. } | FeedError::Json { .. } => {
                FailureKind::UpstreamPayload
            }
        }
    }
}
