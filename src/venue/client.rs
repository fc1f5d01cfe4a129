//! HTTP client for the venue API.

use std::time::Duration;

use anyhow::anyhow;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::pricing::models::{Coordinates, DynamicPricing};

use super::types::{DynamicVenueResponse, StaticVenueResponse};

/// Errors talking to the venue API
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("cannot build venue url: {0}")]
    InvalidUrl(String),

    #[error("request to {url} failed: {source}")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status { url: Url, status: StatusCode },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed venue data from {url}: {reason}")]
    Malformed { url: Url, reason: String },
}

/// Venue resources exposed under `{base}/{venue_slug}/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Static,
    Dynamic,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Static => "static",
            Resource::Dynamic => "dynamic",
        }
    }
}

#[derive(Clone)]
pub struct VenueClient {
    inner: reqwest::Client,
    base: Url,
}

impl VenueClient {
    pub fn new(base: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base: Url = base
            .parse()
            .map_err(|e| anyhow!("{} is not a valid url: {}", base, e))?;

        if base.cannot_be_a_base() {
            return Err(anyhow!("{} cannot be used as a base url", base));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("error building http client: {e}"))?;

        Ok(Self {
            inner: client,
            base,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `{base}/{venue_slug}/{resource}` with the slug percent-encoded
    pub fn resource_url(&self, venue_slug: &str, resource: Resource) -> Result<Url, UpstreamError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push(venue_slug)
            .push(resource.as_str());

        Ok(url)
    }

    /// Venue location, converted from the API's `[lon, lat]` ordering
    pub async fn fetch_coordinates(&self, venue_slug: &str) -> Result<Coordinates, UpstreamError> {
        let url = self.resource_url(venue_slug, Resource::Static)?;
        let response: StaticVenueResponse = self.get_json(&url).await?;

        let pair: [f64; 2] = response
            .venue_raw
            .location
            .coordinates
            .try_into()
            .map_err(|coords: Vec<f64>| UpstreamError::Malformed {
                url: url.clone(),
                reason: format!("expected 2 coordinates, got {}", coords.len()),
            })?;

        let coords = Coordinates::from_lon_lat(pair);
        if !coords.is_in_range() {
            return Err(UpstreamError::Malformed {
                url,
                reason: format!(
                    "coordinates out of range: lat {}, lon {}",
                    coords.latitude, coords.longitude
                ),
            });
        }

        Ok(coords)
    }

    pub async fn fetch_dynamic_pricing(
        &self,
        venue_slug: &str,
    ) -> Result<DynamicPricing, UpstreamError> {
        let url = self.resource_url(venue_slug, Resource::Dynamic)?;
        let response: DynamicVenueResponse = self.get_json(&url).await?;

        let specs = response.venue_raw.delivery_specs;
        let ranges = specs.delivery_pricing.distance_ranges;

        if ranges.is_empty() {
            return Err(UpstreamError::Malformed {
                url,
                reason: "distance_ranges is empty".to_string(),
            });
        }
        if !ranges.windows(2).all(|w| w[0].min <= w[1].min) {
            return Err(UpstreamError::Malformed {
                url,
                reason: "distance_ranges are not ordered by min".to_string(),
            });
        }

        Ok(DynamicPricing {
            order_minimum_no_surcharge: specs.order_minimum_no_surcharge,
            base_price: specs.delivery_pricing.base_price,
            distance_ranges: ranges,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, UpstreamError> {
        tracing::debug!("GET {}", url);

        let response = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(|source| UpstreamError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: url.clone(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Request {
                url: url.clone(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| UpstreamError::Decode {
            url: url.clone(),
            source,
        })
    }
}
