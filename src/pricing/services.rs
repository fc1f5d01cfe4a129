//! Pricing service functions with venue API access.
//!
//! Fetch venue data, then hand it to the pure calculators.

use crate::error::AppError;
use crate::venue::VenueClient;

use super::calculators::calculate_price_breakdown;
use super::models::PriceBreakdown;
use super::requests::DeliveryOrderPriceQuery;

/// Calculate the price of a delivery order.
///
/// Validates the query, fetches the venue location and dynamic pricing
/// concurrently, then runs the calculators. Any failure aborts the whole
/// calculation; there are no partial results.
pub async fn calculate_delivery_order_price(
    client: &VenueClient,
    query: &DeliveryOrderPriceQuery,
) -> Result<PriceBreakdown, AppError> {
    query.validate()?;

    let (venue, pricing) = tokio::try_join!(
        client.fetch_coordinates(&query.venue_slug),
        client.fetch_dynamic_pricing(&query.venue_slug),
    )?;

    tracing::debug!(
        venue_slug = %query.venue_slug,
        venue_lat = venue.latitude,
        venue_lon = venue.longitude,
        base_price = pricing.base_price,
        "Fetched venue data"
    );

    let breakdown =
        calculate_price_breakdown(query.cart_value, query.user_coordinates(), venue, &pricing)?;

    tracing::info!(
        venue_slug = %query.venue_slug,
        distance = breakdown.distance,
        total_price = breakdown.total_price,
        "Priced delivery order"
    );

    Ok(breakdown)
}
