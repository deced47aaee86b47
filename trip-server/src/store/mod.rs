//! Trip persistence.
//!
//! Every structural edit to a trip is written through to storage
//! before the edit is acknowledged, so whatever the backend holds is
//! always a complete, current snapshot. Loads are forgiving: anything
//! unreadable is treated as "no saved trip".

mod error;
mod kv;
mod trip_store;

pub use error::StoreError;
pub use kv::{JsonFileStore, KvStore, MemoryStore};
pub use trip_store::{LastTrip, TripStore, last_trip_key, trip_key};
