//! Request DTOs for the pricing endpoint.

use serde::Deserialize;

use crate::error::AppError;

use super::models::Coordinates;

/// Query string of `GET /api/v1/delivery-order-price/`
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryOrderPriceQuery {
    pub venue_slug: String,
    pub cart_value: i64,
    pub user_lat: f64,
    pub user_lon: f64,
}

impl DeliveryOrderPriceQuery {
    /// Reject values the calculators must never see
    pub fn validate(&self) -> Result<(), AppError> {
        if self.venue_slug.trim().is_empty() {
            return Err(AppError::validation("venue_slug must not be empty"));
        }
        if self.cart_value < 0 {
            return Err(AppError::validation(format!(
                "cart_value must be non-negative, got {}",
                self.cart_value
            )));
        }
        // NaN fails both range checks
        if !(-90.0..=90.0).contains(&self.user_lat) {
            return Err(AppError::validation(format!(
                "user_lat must be between -90 and 90, got {}",
                self.user_lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.user_lon) {
            return Err(AppError::validation(format!(
                "user_lon must be between -180 and 180, got {}",
                self.user_lon
            )));
        }
        Ok(())
    }

    pub fn user_coordinates(&self) -> Coordinates {
        Coordinates::new(self.user_lat, self.user_lon)
    }
}
