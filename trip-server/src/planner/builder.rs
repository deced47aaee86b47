//! Itinerary construction from discovered places.
//!
//! Turns a raw candidate list from the places provider into a planned
//! [`Trip`]: nearest places first, split evenly across the trip's days.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{Coord, DomainError, Poi, TravelMode, Trip, distance_km};

use super::config::PlanConfig;

/// A discovered place that has not yet been scheduled.
///
/// Candidates come straight from the places provider, so the name may
/// be missing and the tags are whatever the provider sent.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Provider-assigned identifier, carried through to the POI.
    pub id: String,

    /// Display name, if the provider has one.
    pub name: Option<String>,

    /// Where the place is.
    pub coordinates: Coord,

    /// Opaque provider metadata, passed through untouched.
    pub tags: Map<String, Value>,
}

impl Candidate {
    /// Create a candidate with no tags.
    pub fn new(id: impl Into<String>, name: Option<String>, coordinates: Coord) -> Self {
        Self {
            id: id.into(),
            name,
            coordinates,
            tags: Map::new(),
        }
    }

    /// Attach provider tags.
    pub fn with_tags(mut self, tags: Map<String, Value>) -> Self {
        self.tags = tags;
        self
    }
}

/// Build an itinerary from candidate places.
///
/// Unnamed candidates are discarded (nothing to show the user). The
/// rest are ranked by great-circle distance from `origin`, nearest
/// first, with ties keeping the provider's order. At most
/// `day_count * per_day_cap` places are selected, then split into
/// consecutive buckets of `ceil(selected / day_count)`: the nearest
/// bucket becomes day 0, the next day 1, and so on, so early days stay
/// close to the origin.
///
/// An empty candidate list is not an error; the result is a valid trip
/// with no POIs.
///
/// # Errors
///
/// Returns `Err` if `day_count` is zero or `destination` is empty.
/// Callers are expected to validate their input before discovery, so
/// hitting this means a caller bug, not bad provider data.
pub fn build_trip(
    destination: &str,
    day_count: usize,
    travel_mode: TravelMode,
    origin: Coord,
    candidates: Vec<Candidate>,
    config: &PlanConfig,
) -> Result<Trip, DomainError> {
    if day_count == 0 {
        return Err(DomainError::InvalidDayCount(0));
    }

    let mut seen = HashSet::new();
    let mut ranked: Vec<(f64, Candidate)> = candidates
        .into_iter()
        .filter(|c| c.name.as_deref().is_some_and(|n| !n.trim().is_empty()))
        .filter(|c| seen.insert(c.id.clone()))
        .map(|c| (distance_km(origin, c.coordinates), c))
        .collect();

    // Stable, so equally distant places keep the provider's order.
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.truncate(day_count.saturating_mul(config.per_day_cap));

    let bucket_size = ranked.len().div_ceil(day_count).max(1);

    let pois: Vec<Poi> = ranked
        .into_iter()
        .enumerate()
        .map(|(i, (_, c))| {
            let name = c.name.unwrap_or_default();
            Poi::new(c.id, name, c.coordinates, c.tags, i / bucket_size)
        })
        .collect();

    debug!(
        destination,
        day_count,
        selected = pois.len(),
        bucket_size,
        "built itinerary"
    );

    Trip::new(destination, day_count, travel_mode, pois)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Named candidates scattered within roughly 10 km of the origin.
    fn candidates_strategy() -> impl Strategy<Value = Vec<Candidate>> {
        prop::collection::vec((-0.05f64..0.05, -0.05f64..0.05), 0..30).prop_map(|offsets| {
            offsets
                .into_iter()
                .enumerate()
                .map(|(i, (dlat, dlon))| {
                    Candidate::new(
                        format!("c{i}"),
                        Some(format!("Place {i}")),
                        Coord::new(41.9 + dlat, 12.5 + dlon).unwrap(),
                    )
                })
                .collect()
        })
    }

    proptest! {
        /// Selection size is min(candidates, day_count * per_day_cap)
        #[test]
        fn selects_min_of_supply_and_cap(
            candidates in candidates_strategy(),
            day_count in 1usize..=5,
        ) {
            let config = PlanConfig::default();
            let expected = candidates
                .len()
                .min(day_count * config.per_day_cap);

            let trip = build_trip(
                "Rome",
                day_count,
                TravelMode::Driving,
                Coord::new(41.9, 12.5).unwrap(),
                candidates,
                &config,
            ).unwrap();

            prop_assert_eq!(trip.pois().len(), expected);
            prop_assert!(trip.validate().is_ok());
        }

        /// The planned list is ordered nearest-first from start to finish
        #[test]
        fn distances_never_decrease(
            candidates in candidates_strategy(),
            day_count in 1usize..=5,
        ) {
            let origin = Coord::new(41.9, 12.5).unwrap();
            let trip = build_trip(
                "Rome",
                day_count,
                TravelMode::Transit,
                origin,
                candidates,
                &PlanConfig::default(),
            ).unwrap();

            let distances: Vec<f64> = trip
                .pois()
                .iter()
                .map(|p| distance_km(origin, p.coordinates))
                .collect();

            for pair in distances.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }

        /// The selected set is exactly the nearest candidates
        #[test]
        fn selection_is_the_nearest_prefix(
            candidates in candidates_strategy(),
            day_count in 1usize..=5,
        ) {
            let origin = Coord::new(41.9, 12.5).unwrap();
            let config = PlanConfig::default();

            let mut by_distance: Vec<(f64, String)> = candidates
                .iter()
                .map(|c| (distance_km(origin, c.coordinates), c.id.clone()))
                .collect();
            by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
            by_distance.truncate(day_count * config.per_day_cap);

            let mut expected: Vec<String> =
                by_distance.into_iter().map(|(_, id)| id).collect();
            expected.sort();

            let trip = build_trip(
                "Rome",
                day_count,
                TravelMode::Walking,
                origin,
                candidates,
                &config,
            ).unwrap();

            let mut got: Vec<String> =
                trip.pois().iter().map(|p| p.id.clone()).collect();
            got.sort();

            prop_assert_eq!(got, expected);
        }

        /// Bucket sizes follow the ceiling split: all buckets equal except
        /// a shorter tail
        #[test]
        fn buckets_follow_ceiling_split(
            candidates in candidates_strategy(),
            day_count in 1usize..=5,
        ) {
            let trip = build_trip(
                "Rome",
                day_count,
                TravelMode::Walking,
                Coord::new(41.9, 12.5).unwrap(),
                candidates,
                &PlanConfig::default(),
            ).unwrap();

            let selected = trip.pois().len();
            let bucket_size = selected.div_ceil(day_count).max(1);

            for day in 0..day_count {
                let start = day * bucket_size;
                let expected = selected.saturating_sub(start).min(bucket_size);
                prop_assert_eq!(trip.day_bucket(day).count(), expected);
            }
        }
    }
}
