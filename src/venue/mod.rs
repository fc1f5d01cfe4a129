//! Venue API client.
//!
//! Fetches venue location and dynamic delivery pricing. Nothing is cached:
//! every quote fetches both resources again.

pub mod client;
pub mod types;

pub use client::{Resource, UpstreamError, VenueClient};
