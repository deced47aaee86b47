//! Typed trip persistence on top of a key-value backend.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{TravelMode, Trip};

use super::error::StoreError;
use super::kv::KvStore;

/// Storage key for one user's trip to one destination.
pub fn trip_key(user: &str, destination: &str, day_count: usize) -> String {
    format!("trip:{user}:{destination}:{day_count}")
}

/// Storage key for a user's most-recent-trip pointer.
pub fn last_trip_key(user: &str) -> String {
    format!("lastTrip:{user}")
}

/// Pointer to the trip a user most recently planned.
///
/// Holds just enough to rebuild the trip key, plus the travel mode so
/// a resume prompt can describe the trip before loading it in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastTrip {
    pub destination: String,
    pub day_count: usize,
    pub travel_mode: TravelMode,
}

impl LastTrip {
    /// The pointer for a trip.
    pub fn for_trip(trip: &Trip) -> Self {
        Self {
            destination: trip.destination().to_string(),
            day_count: trip.day_count(),
            travel_mode: trip.travel_mode(),
        }
    }
}

/// Trip persistence over any [`KvStore`] backend.
#[derive(Debug)]
pub struct TripStore<S> {
    kv: Arc<S>,
}

impl<S> Clone for TripStore<S> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
        }
    }
}

impl<S: KvStore> TripStore<S> {
    /// Create a store over the given backend.
    pub fn new(kv: Arc<S>) -> Self {
        Self { kv }
    }

    /// Persist a trip under its own key.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the trip could not be serialized or written.
    pub fn save_trip(&self, user: &str, trip: &Trip) -> Result<(), StoreError> {
        let key = trip_key(user, trip.destination(), trip.day_count());
        let json = serde_json::to_string(trip)?;
        self.kv.set(&key, &json)
    }

    /// Load a previously saved trip.
    ///
    /// Returns `None` when there is nothing usable: never saved,
    /// unparseable, or parseable but violating trip invariants.
    /// Callers treat all three the same and offer a fresh plan.
    pub fn load_trip(&self, user: &str, destination: &str, day_count: usize) -> Option<Trip> {
        let raw = self.kv.get(&trip_key(user, destination, day_count))?;
        let trip: Trip = serde_json::from_str(&raw).ok()?;
        trip.validate().ok()?;
        Some(trip)
    }

    /// Record `trip` as the user's most recent trip.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the pointer could not be written.
    pub fn save_last_trip(&self, user: &str, trip: &Trip) -> Result<(), StoreError> {
        let pointer = LastTrip::for_trip(trip);
        let json = serde_json::to_string(&pointer)?;
        self.kv.set(&last_trip_key(user), &json)
    }

    /// The user's most recent trip pointer, if a readable one exists.
    pub fn load_last_trip(&self, user: &str) -> Option<LastTrip> {
        let raw = self.kv.get(&last_trip_key(user))?;
        serde_json::from_str(&raw).ok()
    }
}
