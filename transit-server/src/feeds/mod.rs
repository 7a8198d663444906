//! Seoul public transit feeds.
//!
//! This module provides the HTTP client for the four upstream feeds the
//! server reads:
//! - realtime subway arrivals and train positions (keyed by station / line)
//! - bus stop arrivals (keyed by 5-digit stop number)
//! - the bus stop directory and the bike-share station directory, which
//!   only offer offset/length pagination and no server-side search
//!
//! Every feed reports errors inside 200 responses, so each body's embedded
//! status is checked before any rows are converted.

mod client;
mod convert;
mod error;
mod gateway;
mod source;
mod types;

pub use client::{FeedConfig, TransitClient};
pub use error::{FailureKind, FeedError};
pub use gateway::{DEFAULT_BUDGET, Feed, FeedGateway};
pub use source::{FeedSource, Page, PageRange};
