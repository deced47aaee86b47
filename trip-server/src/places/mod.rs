//! Destination geocoding and nearby-place discovery.

mod client;
mod error;
mod mock;

pub use client::{GeonameDto, PlaceDto, PlacesClient, PlacesClientConfig, PointDto};
pub use error::PlacesError;
pub use mock::MockPlacesClient;
