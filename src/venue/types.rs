//! Response shapes of the venue API.

use serde::Deserialize;

use crate::pricing::models::{integral, DistanceRange};

/// `GET {base}/{venue_slug}/static`
#[derive(Debug, Deserialize)]
pub struct StaticVenueResponse {
    pub venue_raw: StaticVenueRaw,
}

#[derive(Debug, Deserialize)]
pub struct StaticVenueRaw {
    pub location: Location,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    /// `[longitude, latitude]`
    pub coordinates: Vec<f64>,
}

/// `GET {base}/{venue_slug}/dynamic`
#[derive(Debug, Deserialize)]
pub struct DynamicVenueResponse {
    pub venue_raw: DynamicVenueRaw,
}

#[derive(Debug, Deserialize)]
pub struct DynamicVenueRaw {
    pub delivery_specs: DeliverySpecs,
}

#[derive(Debug, Deserialize)]
pub struct DeliverySpecs {
    #[serde(deserialize_with = "integral")]
    pub order_minimum_no_surcharge: i64,
    pub delivery_pricing: DeliveryPricing,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryPricing {
    #[serde(deserialize_with = "integral")]
    pub base_price: i64,
    pub distance_ranges: Vec<DistanceRange>,
}
