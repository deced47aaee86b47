//! Domain types for the trip planner.
//!
//! This module contains the core domain model types that represent a
//! planned itinerary. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod coord;
mod error;
mod poi;
mod travel_mode;
mod trip;

pub use coord::{Coord, InvalidCoord, distance_km};
pub use error::DomainError;
pub use poi::Poi;
pub use travel_mode::{InvalidTravelMode, TravelMode};
pub use trip::Trip;
