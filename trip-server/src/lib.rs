//! Trip itinerary planner server.
//!
//! A web application that answers: "I have a few days in this city,
//! what should I see, and on which day?"

pub mod descriptions;
pub mod domain;
pub mod places;
pub mod planner;
pub mod session;
pub mod store;
pub mod sync;
pub mod web;
