//! Web layer for the trip planner.
//!
//! Provides HTTP endpoints for planning trips and editing itineraries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
