//! Trip types and structural edits.
//!
//! A `Trip` is the authoritative in-memory model of one planned
//! itinerary. It owns the ordered POI collection and is the only place
//! where structural edits (moving a place, reordering days, toggling
//! visited) are applied, so the invariants below hold at every point a
//! caller can observe.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{DomainError, Poi, TravelMode};

/// A complete planned itinerary for one destination.
///
/// # Invariants
///
/// - `day_count` is at least 1 and fixed for the trip's lifetime
/// - every POI's `day` is in `[0, day_count)`
/// - POI ids are unique within the trip
/// - the POI list is grouped by day, and order within a day is display
///   order; order across days carries no meaning and is normalized
///
/// Structural edits never drop a POI: the partition of POIs by day is
/// always exactly the set of POIs in the trip.
///
/// # Examples
///
/// ```
/// use trip_server::domain::{Coord, Poi, TravelMode, Trip};
///
/// let colosseum = Poi::new(
///     "w1",
///     "Colosseum",
///     Coord::new(41.8902, 12.4922).unwrap(),
///     serde_json::Map::new(),
///     0,
/// );
///
/// let trip = Trip::new("Rome", 2, TravelMode::Walking, vec![colosseum]).unwrap();
/// assert_eq!(trip.day_count(), 2);
/// assert_eq!(trip.pois().len(), 1);
///
/// // An unknown day count is rejected up front
/// assert!(Trip::new("Rome", 0, TravelMode::Walking, vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    destination: String,
    day_count: usize,
    travel_mode: TravelMode,
    pois: Vec<Poi>,
}

impl Trip {
    /// Construct a trip from its parts.
    ///
    /// The POI list may arrive in any order; it is normalized to the
    /// canonical grouped-by-day order, preserving the given order
    /// within each day.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - the destination is empty or whitespace
    /// - `day_count` is zero
    /// - any POI's `day` is outside `[0, day_count)`
    /// - two POIs share an id
    pub fn new(
        destination: impl Into<String>,
        day_count: usize,
        travel_mode: TravelMode,
        mut pois: Vec<Poi>,
    ) -> Result<Self, DomainError> {
        pois.sort_by_key(|p| p.day);

        let trip = Self {
            destination: destination.into(),
            day_count,
            travel_mode,
            pois,
        };
        trip.validate()?;
        Ok(trip)
    }

    /// Check the trip invariants.
    ///
    /// `Trip` values built through [`Trip::new`] always pass; this is
    /// for payloads deserialized from storage, which bypass the
    /// constructor.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.destination.trim().is_empty() {
            return Err(DomainError::EmptyDestination);
        }

        if self.day_count == 0 {
            return Err(DomainError::InvalidDayCount(0));
        }

        let mut ids = HashSet::new();
        for poi in &self.pois {
            if poi.day >= self.day_count {
                return Err(DomainError::DayOutOfRange {
                    day: poi.day,
                    day_count: self.day_count,
                });
            }
            if !ids.insert(poi.id.as_str()) {
                return Err(DomainError::DuplicatePoiId(poi.id.clone()));
            }
        }

        Ok(())
    }

    /// The destination this trip was planned for.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// How many days the trip covers. Fixed at planning time.
    pub fn day_count(&self) -> usize {
        self.day_count
    }

    /// The display-only travel mode chosen at planning time.
    pub fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    /// All POIs, grouped by day, display order within each day.
    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    /// Look up a POI by id.
    pub fn poi(&self, id: &str) -> Option<&Poi> {
        self.pois.iter().find(|p| p.id == id)
    }

    /// The POIs assigned to one day, in display order.
    pub fn day_bucket(&self, day: usize) -> impl Iterator<Item = &Poi> {
        self.pois.iter().filter(move |p| p.day == day)
    }

    /// Move a POI to a target day and position within that day.
    ///
    /// Only the named POI's `day` changes; every other POI keeps its
    /// assignment. A position past the end of the target day appends.
    /// Moving a POI to the slot it already occupies leaves the trip
    /// unchanged by value.
    ///
    /// Returns `Ok(true)` if the POI exists, `Ok(false)` for an unknown
    /// id (a benign race with a prior removal, deliberately not an
    /// error).
    ///
    /// # Errors
    ///
    /// Returns `Err` if `target_day` is outside `[0, day_count)`; the
    /// trip is untouched in that case.
    pub fn move_poi(
        &mut self,
        id: &str,
        target_day: usize,
        target_position: usize,
    ) -> Result<bool, DomainError> {
        if target_day >= self.day_count {
            return Err(DomainError::DayOutOfRange {
                day: target_day,
                day_count: self.day_count,
            });
        }

        let Some(from_idx) = self.pois.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        let mut poi = self.pois.remove(from_idx);
        poi.day = target_day;

        let slots: Vec<usize> = self
            .pois
            .iter()
            .enumerate()
            .filter(|(_, p)| p.day == target_day)
            .map(|(i, _)| i)
            .collect();

        let insert_at = if target_position < slots.len() {
            slots[target_position]
        } else if let Some(&last) = slots.last() {
            last + 1
        } else {
            // Target day is currently empty; slot the POI where that
            // day's block belongs so the list stays grouped.
            self.pois
                .iter()
                .position(|p| p.day > target_day)
                .unwrap_or(self.pois.len())
        };

        self.pois.insert(insert_at, poi);
        Ok(true)
    }

    /// Remap every POI's day through a permutation: a POI on day `d`
    /// moves to day `permutation[d]`.
    ///
    /// The permutation is checked in full before anything changes, so
    /// the remap is atomic: either every POI is remapped or none is.
    /// Within-day order is preserved.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the permutation's length differs from the day
    /// count, or if it is not a bijection on `[0, day_count)`.
    pub fn reorder_days(&mut self, permutation: &[usize]) -> Result<(), DomainError> {
        if permutation.len() != self.day_count {
            return Err(DomainError::InvalidPermutation(
                "length must equal day count",
            ));
        }

        let mut seen = vec![false; self.day_count];
        for &target in permutation {
            if target >= self.day_count {
                return Err(DomainError::InvalidPermutation(
                    "entries must be valid day indices",
                ));
            }
            if seen[target] {
                return Err(DomainError::InvalidPermutation("entries must not repeat"));
            }
            seen[target] = true;
        }

        for poi in &mut self.pois {
            poi.day = permutation[poi.day];
        }
        self.pois.sort_by_key(|p| p.day);

        Ok(())
    }

    /// Flip a POI's visited flag.
    ///
    /// Returns `true` if the POI exists; an unknown id is a silent
    /// no-op and returns `false`.
    pub fn toggle_visited(&mut self, id: &str) -> bool {
        match self.pois.iter_mut().find(|p| p.id == id) {
            Some(poi) => {
                poi.visited = !poi.visited;
                true
            }
            None => false,
        }
    }

    /// Record the outcome of a description fetch for a POI.
    ///
    /// `None` means the provider had nothing for this place; the POI is
    /// still marked as loaded so it is not fetched again. Returns
    /// `false` without writing anything if the id no longer exists,
    /// which is how late completions for removed POIs are discarded.
    pub fn set_description(&mut self, id: &str, description: Option<String>) -> bool {
        match self.pois.iter_mut().find(|p| p.id == id) {
            Some(poi) => {
                poi.description = description;
                poi.description_loaded = true;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coord;

    fn coord() -> Coord {
        Coord::new(41.9028, 12.4964).unwrap()
    }

    fn poi(id: &str, day: usize) -> Poi {
        Poi::new(id, format!("Place {id}"), coord(), serde_json::Map::new(), day)
    }

    fn trip(day_count: usize, pois: Vec<Poi>) -> Trip {
        Trip::new("Rome", day_count, TravelMode::Walking, pois).unwrap()
    }

    fn days_of(t: &Trip) -> Vec<(&str, usize)> {
        t.pois().iter().map(|p| (p.id.as_str(), p.day)).collect()
    }

    #[test]
    fn new_rejects_empty_destination() {
        assert!(Trip::new("", 2, TravelMode::Walking, vec![]).is_err());
        assert!(Trip::new("   ", 2, TravelMode::Walking, vec![]).is_err());
    }

    #[test]
    fn new_rejects_zero_day_count() {
        let err = Trip::new("Rome", 0, TravelMode::Walking, vec![]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDayCount(0)));
    }

    #[test]
    fn new_rejects_poi_day_out_of_range() {
        let err = Trip::new("Rome", 2, TravelMode::Walking, vec![poi("a", 2)]).unwrap_err();
        assert!(matches!(
            err,
            DomainError::DayOutOfRange { day: 2, day_count: 2 }
        ));
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let err = Trip::new(
            "Rome",
            2,
            TravelMode::Walking,
            vec![poi("a", 0), poi("a", 1)],
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::DuplicatePoiId(id) if id == "a"));
    }

    #[test]
    fn new_allows_empty_poi_list() {
        let t = trip(3, vec![]);
        assert!(t.pois().is_empty());
        assert_eq!(t.day_count(), 3);
    }

    #[test]
    fn new_groups_pois_by_day() {
        let t = trip(2, vec![poi("a", 1), poi("b", 0), poi("c", 1), poi("d", 0)]);
        assert_eq!(days_of(&t), vec![("b", 0), ("d", 0), ("a", 1), ("c", 1)]);
    }

    #[test]
    fn day_bucket_contents() {
        let t = trip(3, vec![poi("a", 0), poi("b", 1), poi("c", 1)]);

        let day1: Vec<&str> = t.day_bucket(1).map(|p| p.id.as_str()).collect();
        assert_eq!(day1, vec!["b", "c"]);
        assert_eq!(t.day_bucket(2).count(), 0);
    }

    #[test]
    fn move_to_another_day() {
        let mut t = trip(2, vec![poi("a", 0), poi("b", 0), poi("c", 1), poi("d", 1)]);

        assert!(t.move_poi("a", 1, 0).unwrap());

        assert_eq!(t.poi("a").unwrap().day, 1);
        let day1: Vec<&str> = t.day_bucket(1).map(|p| p.id.as_str()).collect();
        assert_eq!(day1, vec!["a", "c", "d"]);

        // Nobody else moved
        assert_eq!(t.poi("b").unwrap().day, 0);
        assert_eq!(t.poi("c").unwrap().day, 1);
        assert_eq!(t.poi("d").unwrap().day, 1);
    }

    #[test]
    fn move_within_day_to_front() {
        let mut t = trip(1, vec![poi("a", 0), poi("b", 0), poi("c", 0)]);

        assert!(t.move_poi("c", 0, 0).unwrap());

        let day0: Vec<&str> = t.day_bucket(0).map(|p| p.id.as_str()).collect();
        assert_eq!(day0, vec!["c", "a", "b"]);
    }

    #[test]
    fn move_position_past_end_appends() {
        let mut t = trip(2, vec![poi("a", 0), poi("b", 1), poi("c", 1)]);

        assert!(t.move_poi("a", 1, 99).unwrap());

        let day1: Vec<&str> = t.day_bucket(1).map(|p| p.id.as_str()).collect();
        assert_eq!(day1, vec!["b", "c", "a"]);
    }

    #[test]
    fn move_to_empty_day() {
        let mut t = trip(3, vec![poi("a", 0), poi("b", 0)]);

        assert!(t.move_poi("a", 2, 0).unwrap());

        let day2: Vec<&str> = t.day_bucket(2).map(|p| p.id.as_str()).collect();
        assert_eq!(day2, vec!["a"]);
        assert_eq!(t.pois().len(), 2);
    }

    #[test]
    fn move_unknown_id_is_noop() {
        let mut t = trip(2, vec![poi("a", 0)]);
        let before = t.clone();

        assert!(!t.move_poi("ghost", 1, 0).unwrap());
        assert_eq!(t, before);
    }

    #[test]
    fn move_rejects_day_out_of_range() {
        let mut t = trip(2, vec![poi("a", 0)]);
        let before = t.clone();

        let err = t.move_poi("a", 2, 0).unwrap_err();
        assert!(matches!(err, DomainError::DayOutOfRange { day: 2, .. }));
        assert_eq!(t, before);
    }

    #[test]
    fn move_to_current_slot_is_noop() {
        let mut t = trip(2, vec![poi("a", 0), poi("b", 0), poi("c", 1)]);
        let before = t.clone();

        // "b" is the second entry of day 0
        assert!(t.move_poi("b", 0, 1).unwrap());
        assert_eq!(t, before);
    }

    #[test]
    fn reorder_days_swaps() {
        let mut t = trip(2, vec![poi("a", 0), poi("b", 0), poi("c", 1)]);

        t.reorder_days(&[1, 0]).unwrap();

        let day0: Vec<&str> = t.day_bucket(0).map(|p| p.id.as_str()).collect();
        let day1: Vec<&str> = t.day_bucket(1).map(|p| p.id.as_str()).collect();
        assert_eq!(day0, vec!["c"]);
        assert_eq!(day1, vec!["a", "b"]);
    }

    #[test]
    fn reorder_days_three_day_cycle() {
        let mut t = trip(3, vec![poi("a", 0), poi("b", 1), poi("c", 2)]);

        // old day 0 -> 2, 1 -> 0, 2 -> 1
        t.reorder_days(&[2, 0, 1]).unwrap();

        assert_eq!(t.poi("a").unwrap().day, 2);
        assert_eq!(t.poi("b").unwrap().day, 0);
        assert_eq!(t.poi("c").unwrap().day, 1);
    }

    #[test]
    fn reorder_days_identity_unchanged() {
        let mut t = trip(3, vec![poi("a", 0), poi("b", 1), poi("c", 2)]);
        let before = t.clone();

        t.reorder_days(&[0, 1, 2]).unwrap();
        assert_eq!(t, before);
    }

    #[test]
    fn reorder_days_rejects_wrong_length() {
        let mut t = trip(3, vec![poi("a", 0)]);
        assert!(t.reorder_days(&[0, 1]).is_err());
        assert!(t.reorder_days(&[0, 1, 2, 0]).is_err());
    }

    #[test]
    fn reorder_days_rejects_repeated_entry() {
        let mut t = trip(2, vec![poi("a", 0)]);
        assert!(t.reorder_days(&[0, 0]).is_err());
    }

    #[test]
    fn reorder_days_rejects_out_of_range_entry() {
        let mut t = trip(2, vec![poi("a", 0)]);
        assert!(t.reorder_days(&[0, 2]).is_err());
    }

    #[test]
    fn rejected_reorder_leaves_trip_unchanged() {
        let mut t = trip(2, vec![poi("a", 0), poi("b", 1)]);
        let before = t.clone();

        assert!(t.reorder_days(&[1, 1]).is_err());
        assert_eq!(t, before);
    }

    #[test]
    fn toggle_flips_and_flips_back() {
        let mut t = trip(1, vec![poi("a", 0)]);

        assert!(t.toggle_visited("a"));
        assert!(t.poi("a").unwrap().visited);

        assert!(t.toggle_visited("a"));
        assert!(!t.poi("a").unwrap().visited);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut t = trip(1, vec![poi("a", 0)]);
        let before = t.clone();

        assert!(!t.toggle_visited("ghost"));
        assert_eq!(t, before);
    }

    #[test]
    fn set_description_marks_loaded() {
        let mut t = trip(1, vec![poi("a", 0)]);

        assert!(t.set_description("a", Some("An old amphitheatre.".into())));

        let p = t.poi("a").unwrap();
        assert_eq!(p.description.as_deref(), Some("An old amphitheatre."));
        assert!(p.description_loaded);
    }

    #[test]
    fn set_description_none_still_marks_loaded() {
        let mut t = trip(1, vec![poi("a", 0)]);

        assert!(t.set_description("a", None));

        let p = t.poi("a").unwrap();
        assert!(p.description.is_none());
        assert!(p.description_loaded);
    }

    #[test]
    fn set_description_unknown_id_discarded() {
        let mut t = trip(1, vec![poi("a", 0)]);
        let before = t.clone();

        assert!(!t.set_description("ghost", Some("late".into())));
        assert_eq!(t, before);
    }

    #[test]
    fn serde_payload_shape() {
        let t = trip(2, vec![poi("a", 0)]);
        let json = serde_json::to_string(&t).unwrap();

        assert!(json.contains("\"dayCount\":2"), "got {json}");
        assert!(json.contains("\"travelMode\":\"walking\""), "got {json}");
        assert!(json.contains("\"pois\""), "got {json}");
    }

    #[test]
    fn serde_roundtrip_equality() {
        let mut t = trip(2, vec![poi("a", 0), poi("b", 1)]);
        t.toggle_visited("a");
        t.set_description("b", Some("text".into()));

        let json = serde_json::to_string(&t).unwrap();
        let back: Trip = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
