//! Domain models for delivery pricing.
//!
//! Venue data is fetched fresh from the venue API for every request and
//! never stored; these types only live for the duration of one quote.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// A point on the Earth's surface in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build from the venue API's `[longitude, latitude]` ordering
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[1], pair[0])
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180]
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One distance tier from the venue's delivery pricing.
///
/// The tier covers the half-open interval `[min, max)` in meters. The last
/// tier of a venue only marks the maximum servable distance through `min`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DistanceRange {
    #[serde(deserialize_with = "integral")]
    pub min: i64,
    #[serde(deserialize_with = "integral")]
    pub max: i64,
    /// Flat amount added to the base price
    #[serde(deserialize_with = "integral")]
    pub a: i64,
    /// Amount added per 10 meters of distance
    pub b: f64,
}

impl DistanceRange {
    pub fn contains(&self, distance: i64) -> bool {
        self.min <= distance && distance < self.max
    }
}

/// Accept a JSON integer, or a float with no fractional part (`100.0`)
pub(crate) fn integral<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
    }

    match Number::deserialize(deserializer)? {
        Number::Int(n) => Ok(n),
        Number::Float(f) if f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_992.0 => Ok(f as i64),
        Number::Float(f) => Err(D::Error::custom(format!("expected an integer, got {f}"))),
    }
}

/// Dynamic delivery pricing of a venue
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicPricing {
    pub order_minimum_no_surcharge: i64,
    pub base_price: i64,
    /// Ascending by `min`, never empty
    pub distance_ranges: Vec<DistanceRange>,
}

impl DynamicPricing {
    /// Distance from which the venue no longer delivers
    pub fn max_distance(&self) -> Option<i64> {
        self.distance_ranges.last().map(|range| range.min)
    }

    /// Tiers that can price a delivery (all but the sentinel)
    pub fn active_ranges(&self) -> &[DistanceRange] {
        match self.distance_ranges.split_last() {
            Some((_, active)) => active,
            None => &[],
        }
    }
}

/// Full price breakdown of one delivery order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub cart_value: i64,
    pub small_order_surcharge: i64,
    pub delivery_fee: i64,
    /// Meters between customer and venue
    pub distance: i64,
    pub total_price: i64,
}
