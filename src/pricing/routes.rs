//! HTTP routes for delivery pricing.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::requests::DeliveryOrderPriceQuery;
use super::responses::DeliveryOrderPriceResponse;
use super::services;

pub const DELIVERY_ORDER_PRICE_PATH: &str = "/api/v1/delivery-order-price/";

/// Pricing routes, served with and without the trailing slash
pub fn router() -> Router<AppState> {
    Router::new()
        .route(DELIVERY_ORDER_PRICE_PATH, get(delivery_order_price))
        .route(
            DELIVERY_ORDER_PRICE_PATH.trim_end_matches('/'),
            get(delivery_order_price),
        )
}

/// `GET /api/v1/delivery-order-price/`
pub async fn delivery_order_price(
    State(state): State<AppState>,
    query: std::result::Result<Query<DeliveryOrderPriceQuery>, QueryRejection>,
) -> Result<Json<DeliveryOrderPriceResponse>> {
    let Query(query) = query?;

    let breakdown = services::calculate_delivery_order_price(&state.venue_client, &query).await?;

    Ok(Json(breakdown.into()))
}
