//! Itinerary planner.
//!
//! This module implements the core planning algorithm that answers:
//! "I have N days in this city - what should I see, and on which day?"
//!
//! Places are ranked by distance from the destination's centre, capped
//! to a per-day budget, and split into consecutive day buckets so early
//! days stay closest to home base.

mod builder;
mod config;

pub use builder::{Candidate, build_trip};
pub use config::PlanConfig;
