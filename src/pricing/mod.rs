//! Delivery order pricing.
//!
//! Pure calculators price an order from venue data fetched by
//! [`crate::venue::VenueClient`]; the service layer wires the two together
//! behind `GET /api/v1/delivery-order-price/`.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::PricingError;
pub use models::{Coordinates, DistanceRange, DynamicPricing, PriceBreakdown};
pub use routes::router;
