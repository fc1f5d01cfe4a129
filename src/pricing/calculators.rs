//! Core pricing calculation functions.
//!
//! Pure functions for delivery pricing math - no network access.

use super::models::{Coordinates, DynamicPricing, PriceBreakdown};

/// Earth radius used for delivery distances, in meters.
///
/// Smaller than the usual mean radius; venue distance tiers are tuned
/// against it, so distances must keep using this value.
pub const EARTH_RADIUS_METERS: f64 = 6_373_000.0;

/// Largest magnitude an f64 fee may have and still convert to i64 exactly
const MAX_EXACT_FEE: f64 = 9_007_199_254_740_992.0;

/// Errors raised while pricing an order
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Distance exceeds maximum limit of {limit} meters")]
    DistanceExceeded { distance: i64, limit: i64 },

    #[error("Venue has no delivery distance ranges")]
    NoDistanceRanges,

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl PricingError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Great-circle distance in whole meters between two points given in
/// decimal degrees, using the haversine formula.
///
/// The result is rounded half to even.
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> i64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = ((1.0 - dlat.cos() + lat1.cos() * lat2.cos() * (1.0 - dlon.cos())) / 2.0).sqrt();
    let distance = 2.0 * EARTH_RADIUS_METERS * a.asin();

    distance.round_ties_even() as i64
}

/// Distance in meters between two coordinates
pub fn distance_between(from: Coordinates, to: Coordinates) -> i64 {
    calculate_distance(from.latitude, from.longitude, to.latitude, to.longitude)
}

/// Calculate the delivery fee for a distance.
///
/// The last distance range only marks the maximum servable distance: any
/// distance at or beyond its `min` is rejected. Otherwise the first range
/// containing the distance supplies `a` and `b`. A distance that falls in
/// no range prices with `a = 0` and `b = 0`.
///
/// fee = round(base_price + a + b * distance / 10), evaluated in f64 and
/// rounded half to even.
pub fn calculate_delivery_fee(
    distance: i64,
    pricing: &DynamicPricing,
) -> Result<i64, PricingError> {
    let limit = pricing.max_distance().ok_or(PricingError::NoDistanceRanges)?;
    if distance >= limit {
        return Err(PricingError::DistanceExceeded { distance, limit });
    }

    let (a, b) = pricing
        .active_ranges()
        .iter()
        .find(|range| range.contains(distance))
        .map(|range| (range.a, range.b))
        .unwrap_or((0, 0.0));

    let fee = pricing.base_price as f64 + a as f64 + b * distance as f64 / 10.0;
    let fee = fee.round_ties_even();

    if !fee.is_finite() || fee.abs() > MAX_EXACT_FEE {
        return Err(PricingError::invalid("delivery_fee", format!("{} is out of range", fee)));
    }

    Ok(fee as i64)
}

/// Surcharge bringing a small cart up to the venue's order minimum.
///
/// Zero once the cart value reaches the minimum.
pub fn calculate_small_order_surcharge(cart_value: i64, order_minimum_no_surcharge: i64) -> i64 {
    order_minimum_no_surcharge.saturating_sub(cart_value).max(0)
}

/// Sum of cart value, delivery fee and small order surcharge
pub fn calculate_total_price(
    cart_value: i64,
    delivery_fee: i64,
    small_order_surcharge: i64,
) -> Result<i64, PricingError> {
    cart_value
        .checked_add(delivery_fee)
        .and_then(|v| v.checked_add(small_order_surcharge))
        .ok_or_else(|| PricingError::invalid("total_price", "sum overflows"))
}

/// Price a delivery order from already fetched venue data.
///
/// Runs distance, delivery fee, small order surcharge and total in order.
pub fn calculate_price_breakdown(
    cart_value: i64,
    customer: Coordinates,
    venue: Coordinates,
    pricing: &DynamicPricing,
) -> Result<PriceBreakdown, PricingError> {
    let distance = distance_between(customer, venue);
    let delivery_fee = calculate_delivery_fee(distance, pricing)?;
    let small_order_surcharge =
        calculate_small_order_surcharge(cart_value, pricing.order_minimum_no_surcharge);
    let total_price = calculate_total_price(cart_value, delivery_fee, small_order_surcharge)?;

    Ok(PriceBreakdown {
        cart_value,
        small_order_surcharge,
        delivery_fee,
        distance,
        total_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::DistanceRange;

    fn tier(min: i64, max: i64, a: i64, b: f64) -> DistanceRange {
        DistanceRange { min, max, a, b }
    }

    fn sample_pricing() -> DynamicPricing {
        DynamicPricing {
            order_minimum_no_surcharge: 1000,
            base_price: 190,
            distance_ranges: vec![
                tier(0, 500, 0, 0.0),
                tier(500, 1000, 100, 0.0),
                tier(1000, 1500, 200, 0.0),
                tier(1500, 2000, 200, 1.0),
                tier(2000, 0, 0, 0.0),
            ],
        }
    }

    // ==================== calculate_distance tests ====================

    #[test]
    fn test_distance_berlin_to_paris() {
        // 877738.78 before rounding
        assert_eq!(calculate_distance(52.5200, 13.4050, 48.8566, 2.3522), 877_739);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let forward = calculate_distance(52.5200, 13.4050, 48.8566, 2.3522);
        let backward = calculate_distance(48.8566, 2.3522, 52.5200, 13.4050);
        assert_eq!(forward, backward);

        let forward = calculate_distance(60.17012143, 24.92813512, 60.1699, 24.9384);
        let backward = calculate_distance(60.1699, 24.9384, 60.17012143, 24.92813512);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(calculate_distance(60.17012143, 24.92813512, 60.17012143, 24.92813512), 0);
        assert_eq!(calculate_distance(-90.0, 180.0, -90.0, 180.0), 0);
    }

    #[test]
    fn test_distance_short_hop_within_a_city() {
        let venue = Coordinates::new(60.17012143, 24.92813512);
        assert_eq!(distance_between(Coordinates::new(60.17094, 24.93087), venue), 177);
        assert_eq!(distance_between(Coordinates::new(60.1699, 24.9384), venue), 568);
    }

    // ==================== calculate_delivery_fee tests ====================

    #[test]
    fn test_delivery_fee_first_tier() {
        assert_eq!(calculate_delivery_fee(200, &sample_pricing()), Ok(190));
    }

    #[test]
    fn test_delivery_fee_flat_addend_tier() {
        assert_eq!(calculate_delivery_fee(600, &sample_pricing()), Ok(290));
    }

    #[test]
    fn test_delivery_fee_per_distance_tier() {
        // 190 + 200 + 1.0 * 1600 / 10
        assert_eq!(calculate_delivery_fee(1600, &sample_pricing()), Ok(550));
    }

    #[test]
    fn test_delivery_fee_lower_bound_is_inclusive() {
        let pricing = sample_pricing();
        assert_eq!(calculate_delivery_fee(0, &pricing), Ok(190));
        assert_eq!(calculate_delivery_fee(499, &pricing), Ok(190));
        assert_eq!(calculate_delivery_fee(500, &pricing), Ok(290));
        assert_eq!(calculate_delivery_fee(1000, &pricing), Ok(390));
    }

    #[test]
    fn test_delivery_fee_at_sentinel_min_is_rejected() {
        assert_eq!(
            calculate_delivery_fee(2000, &sample_pricing()),
            Err(PricingError::DistanceExceeded {
                distance: 2000,
                limit: 2000
            })
        );
    }

    #[test]
    fn test_delivery_fee_beyond_sentinel_is_rejected() {
        let err = calculate_delivery_fee(877_739, &sample_pricing()).unwrap_err();
        assert_eq!(err.to_string(), "Distance exceeds maximum limit of 2000 meters");
    }

    #[test]
    fn test_delivery_fee_unmatched_tier_falls_back_to_base_price() {
        let pricing = DynamicPricing {
            order_minimum_no_surcharge: 0,
            base_price: 190,
            distance_ranges: vec![
                tier(0, 500, 0, 0.0),
                tier(1000, 1500, 100, 2.0),
                tier(2000, 0, 0, 0.0),
            ],
        };

        assert_eq!(calculate_delivery_fee(700, &pricing), Ok(190));
    }

    #[test]
    fn test_delivery_fee_non_decreasing_within_tier() {
        let pricing = sample_pricing();
        let fees: Vec<i64> = (1500..2000)
            .step_by(7)
            .map(|d| calculate_delivery_fee(d, &pricing).unwrap())
            .collect();

        assert!(fees.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_delivery_fee_rounds_half_to_even() {
        let pricing = DynamicPricing {
            order_minimum_no_surcharge: 0,
            base_price: 0,
            distance_ranges: vec![tier(0, 2000, 0, 0.5), tier(2000, 0, 0, 0.0)],
        };

        // 50.5 and 51.5
        assert_eq!(calculate_delivery_fee(1010, &pricing), Ok(50));
        assert_eq!(calculate_delivery_fee(1030, &pricing), Ok(52));
    }

    #[test]
    fn test_delivery_fee_without_ranges() {
        let pricing = DynamicPricing {
            order_minimum_no_surcharge: 0,
            base_price: 190,
            distance_ranges: vec![],
        };

        assert_eq!(
            calculate_delivery_fee(10, &pricing),
            Err(PricingError::NoDistanceRanges)
        );
    }

    #[test]
    fn test_delivery_fee_follows_float_arithmetic() {
        let pricing = DynamicPricing {
            order_minimum_no_surcharge: 0,
            base_price: 190,
            distance_ranges: vec![
                tier(0, 3000, 0, 1.1),
                tier(3000, 5000, 0, 1.37),
                tier(5000, 0, 0, 0.0),
            ],
        };

        // 492.50000000000006 and 806.5000000000001 sit just above the tie
        assert_eq!(calculate_delivery_fee(2750, &pricing), Ok(493));
        assert_eq!(calculate_delivery_fee(4500, &pricing), Ok(807));
    }

    #[test]
    fn test_delivery_fee_just_below_tie_rounds_down() {
        let pricing = DynamicPricing {
            order_minimum_no_surcharge: 0,
            base_price: 190,
            distance_ranges: vec![tier(0, 5000, 0, 1.14), tier(5000, 0, 0, 0.0)],
        };

        // 503.49999999999994 and 731.4999999999999
        assert_eq!(calculate_delivery_fee(2750, &pricing), Ok(503));
        assert_eq!(calculate_delivery_fee(4750, &pricing), Ok(731));
    }

    #[test]
    fn test_delivery_fee_with_unrepresentable_multiplier() {
        let pricing = DynamicPricing {
            order_minimum_no_surcharge: 0,
            base_price: 190,
            distance_ranges: vec![tier(0, 2000, 0, 1e300), tier(2000, 0, 0, 0.0)],
        };

        assert!(matches!(
            calculate_delivery_fee(100, &pricing),
            Err(PricingError::InvalidValue { .. })
        ));
    }

    // ==================== surcharge / total tests ====================

    #[test]
    fn test_small_order_surcharge_below_minimum() {
        assert_eq!(calculate_small_order_surcharge(10, 20), 10);
        assert_eq!(calculate_small_order_surcharge(0, 1000), 1000);
    }

    #[test]
    fn test_small_order_surcharge_at_or_above_minimum() {
        assert_eq!(calculate_small_order_surcharge(20, 20), 0);
        assert_eq!(calculate_small_order_surcharge(25, 20), 0);
    }

    #[test]
    fn test_total_price_sums_components() {
        assert_eq!(calculate_total_price(10, 5, 2), Ok(17));
        assert_eq!(calculate_total_price(0, 0, 0), Ok(0));
    }

    #[test]
    fn test_total_price_overflow() {
        assert!(matches!(
            calculate_total_price(i64::MAX, 1, 0),
            Err(PricingError::InvalidValue { field: "total_price", .. })
        ));
    }

    // ==================== calculate_price_breakdown tests ====================

    #[test]
    fn test_price_breakdown_small_cart() {
        let venue = Coordinates::new(60.17012143, 24.92813512);
        let customer = Coordinates::new(60.1699, 24.9384);

        let breakdown = calculate_price_breakdown(800, customer, venue, &sample_pricing()).unwrap();

        assert_eq!(
            breakdown,
            PriceBreakdown {
                cart_value: 800,
                small_order_surcharge: 200,
                delivery_fee: 290,
                distance: 568,
                total_price: 1290,
            }
        );
    }

    #[test]
    fn test_price_breakdown_out_of_range() {
        let paris = Coordinates::new(48.8566, 2.3522);
        let berlin = Coordinates::new(52.5200, 13.4050);

        assert!(matches!(
            calculate_price_breakdown(1000, paris, berlin, &sample_pricing()),
            Err(PricingError::DistanceExceeded { .. })
        ));
    }
}
