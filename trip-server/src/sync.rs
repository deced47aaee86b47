//! Derived view state for the itinerary UI.
//!
//! After any structural change the whole view is recomputed from the
//! trip rather than patched incrementally. The render set is a pure
//! function of the trip, so two identical trips always produce the
//! same lists and markers no matter which edits led there.

use serde::Serialize;

use crate::domain::{Coord, Trip};

/// Marker colors by day, cycled when a trip has more days than colors.
pub const MARKER_PALETTE: [&str; 8] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6", "#9a6324",
];

/// The marker color for a day.
pub fn marker_color(day: usize) -> &'static str {
    MARKER_PALETTE[day % MARKER_PALETTE.len()]
}

/// One POI row in a day's list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub id: String,
    pub name: String,
    pub visited: bool,
    pub description_loaded: bool,
}

/// The ordered POI list for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayList {
    pub day: usize,
    pub entries: Vec<ListEntry>,
}

/// One map marker for a not-yet-visited POI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub coordinates: Coord,
    pub color: &'static str,
    pub day: usize,
}

/// Everything the UI needs to redraw after a change.
///
/// `days` always has one entry per trip day, empty days included.
/// `markers` holds exactly one marker per non-visited POI; visited POIs
/// stay in their day lists but disappear from the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSet {
    pub days: Vec<DayList>,
    pub markers: Vec<Marker>,
}

/// Compute the complete view for a trip.
pub fn render(trip: &Trip) -> RenderSet {
    let days = (0..trip.day_count())
        .map(|day| DayList {
            day,
            entries: trip
                .day_bucket(day)
                .map(|p| ListEntry {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    visited: p.visited,
                    description_loaded: p.description_loaded,
                })
                .collect(),
        })
        .collect();

    let markers = trip
        .pois()
        .iter()
        .filter(|p| !p.visited)
        .map(|p| Marker {
            id: p.id.clone(),
            coordinates: p.coordinates,
            color: marker_color(p.day),
            day: p.day,
        })
        .collect();

    RenderSet { days, markers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Poi, TravelMode};

    fn poi(id: &str, day: usize) -> Poi {
        Poi::new(
            id,
            format!("Place {id}"),
            Coord::new(41.9, 12.5).unwrap(),
            serde_json::Map::new(),
            day,
        )
    }

    fn trip(day_count: usize, pois: Vec<Poi>) -> Trip {
        Trip::new("Rome", day_count, TravelMode::Walking, pois).unwrap()
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(marker_color(0), MARKER_PALETTE[0]);
        assert_eq!(marker_color(3), MARKER_PALETTE[3]);
        assert_eq!(marker_color(8), MARKER_PALETTE[0]);
        assert_eq!(marker_color(9), MARKER_PALETTE[1]);
    }

    #[test]
    fn empty_trip_renders_empty_days() {
        let set = render(&trip(3, vec![]));

        assert_eq!(set.days.len(), 3);
        assert!(set.days.iter().all(|d| d.entries.is_empty()));
        assert!(set.markers.is_empty());
    }

    #[test]
    fn day_lists_mirror_assignments() {
        let set = render(&trip(2, vec![poi("a", 0), poi("b", 1), poi("c", 1)]));

        assert_eq!(set.days.len(), 2);
        assert_eq!(set.days[0].day, 0);
        assert_eq!(set.days[0].entries.len(), 1);
        assert_eq!(set.days[0].entries[0].id, "a");

        let day1_ids: Vec<&str> = set.days[1].entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(day1_ids, vec!["b", "c"]);
    }

    #[test]
    fn visited_pois_stay_listed_but_lose_their_marker() {
        let mut t = trip(1, vec![poi("a", 0), poi("b", 0)]);
        t.toggle_visited("a");

        let set = render(&t);

        assert_eq!(set.days[0].entries.len(), 2);
        assert!(set.days[0].entries[0].visited);

        assert_eq!(set.markers.len(), 1);
        assert_eq!(set.markers[0].id, "b");
    }

    #[test]
    fn markers_are_colored_by_day() {
        let set = render(&trip(3, vec![poi("a", 0), poi("b", 2)]));

        assert_eq!(set.markers[0].color, MARKER_PALETTE[0]);
        assert_eq!(set.markers[1].color, MARKER_PALETTE[2]);
        assert_eq!(set.markers[1].day, 2);
    }

    #[test]
    fn render_is_deterministic() {
        let t = trip(2, vec![poi("a", 0), poi("b", 1)]);
        assert_eq!(render(&t), render(&t));
    }
}
