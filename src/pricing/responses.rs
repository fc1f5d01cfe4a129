//! Response DTOs for the pricing endpoint.

use serde::Serialize;

use super::models::PriceBreakdown;

/// Body of a successful price calculation
#[derive(Debug, Serialize)]
pub struct DeliveryOrderPriceResponse {
    pub total_price: i64,
    pub small_order_surcharge: i64,
    pub cart_value: i64,
    pub delivery: DeliveryResponse,
}

#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub fee: i64,
    pub distance: i64,
}

impl From<PriceBreakdown> for DeliveryOrderPriceResponse {
    fn from(breakdown: PriceBreakdown) -> Self {
        Self {
            total_price: breakdown.total_price,
            small_order_surcharge: breakdown.small_order_surcharge,
            cart_value: breakdown.cart_value,
            delivery: DeliveryResponse {
                fee: breakdown.delivery_fee,
                distance: breakdown.distance,
            },
        }
    }
}

/// Body of every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            errors: vec![ErrorDetail {
                code: code.into(),
                message: message.into(),
            }],
        }
    }
}
