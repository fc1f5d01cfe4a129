//! Delivery order price calculator.
//!
//! Prices a delivery order for one venue from the customer's cart value and
//! location, using venue data fetched from the venue API on every request.

pub mod config;
pub mod error;
pub mod pricing;
pub mod venue;

use axum::Router;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::venue::VenueClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub venue_client: VenueClient,
}

impl AppState {
    pub fn new(venue_client: VenueClient) -> Self {
        Self { venue_client }
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(pricing::router())
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
