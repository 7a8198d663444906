//! Server configuration from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::warn;

use crate::feeds::FeedConfig;

/// Address the server listens on unless `TRANSIT_BIND_ADDR` says otherwise.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Seconds allowed per upstream call unless `FEED_TIMEOUT_SECS` says otherwise.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub feeds: FeedConfig,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// Missing API keys are not fatal: the server starts and the affected
    /// feeds fail upstream.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let key = |var: &'static str| {
            let value = lookup(var).filter(|v| !v.trim().is_empty());
            if value.is_none() {
                warn!(var, "API key not set, calls to its feeds will fail");
            }
            value
        };

        let open_api_key = key("SEOUL_OPEN_API_KEY").unwrap_or_default();
        let subway_api_key = match lookup("SEOUL_SUBWAY_API_KEY").filter(|v| !v.trim().is_empty()) {
            Some(key) => key,
            None => open_api_key.clone(),
        };
        let bus_service_key = key("BUS_SERVICE_KEY").unwrap_or_default();

        let bind_addr = match lookup("TRANSIT_BIND_ADDR") {
            Some(value) => parse_bind_addr(&value)?,
            None => parse_bind_addr(DEFAULT_BIND_ADDR)?,
        };

        let timeout_secs = match lookup("FEED_TIMEOUT_SECS") {
            Some(value) => parse_timeout(&value)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let feeds = FeedConfig::new(open_api_key)
            .with_subway_key(subway_api_key)
            .with_bus_key(bus_service_key)
            .with_timeout(Duration::from_secs(timeout_secs));

        Ok(Self { feeds, bind_addr })
    }
}

fn parse_bind_addr(value: &str) -> Result<SocketAddr, ConfigError> {
    value.trim().parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
        var: "TRANSIT_BIND_ADDR",
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_timeout(value: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "FEED_TIMEOUT_SECS",
        value: value.to_string(),
        reason,
    };
    let secs: u64 = value.trim().parse().map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
    if secs == 0 {
        return Err(invalid("must be at least 1".to_string()));
    }
    Ok(secs)
}
