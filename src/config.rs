//! Service configuration from environment variables.
//!
//! `main` loads `.env` with dotenvy before reading these.

use std::str::FromStr;
use std::time::Duration;

use anyhow::anyhow;

pub const DEFAULT_VENUE_API_URL: &str =
    "https://consumer-api.development.dev.woltapi.com/home-assignment-api/v1/venues";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the venue API, without the venue slug
    pub venue_api_url: String,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&lookup, "PORT", 8000)?;
        let venue_api_url =
            lookup("VENUE_API_URL").unwrap_or_else(|| DEFAULT_VENUE_API_URL.to_string());
        let timeout_secs: u64 = parse_var(&lookup, "UPSTREAM_TIMEOUT_SECS", 5)?;

        if timeout_secs == 0 {
            return Err(anyhow!("UPSTREAM_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(Self {
            host,
            port,
            venue_api_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow!("{name}={value:?} is invalid: {e}")),
        None => Ok(default),
    }
}
