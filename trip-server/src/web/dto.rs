//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Poi, Trip};
use crate::store::LastTrip;
use crate::sync::RenderSet;

/// Request to plan a fresh trip.
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    /// Who the trip belongs to
    pub user: String,

    /// Free-text destination, e.g. "Rome"
    pub destination: String,

    /// How many days the trip covers
    pub day_count: usize,

    /// Travel mode: "driving", "walking" or "transit"
    pub travel_mode: String,
}

/// Request to move a POI to a day and position.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub user: String,

    /// POI id to move
    pub id: String,

    /// Target day index (0-based)
    pub day: usize,

    /// Target position within the day (0-based; past-the-end appends)
    pub position: usize,
}

/// Request to remap days through a permutation.
#[derive(Debug, Deserialize)]
pub struct ReorderDaysRequest {
    pub user: String,

    /// `permutation[old_day] = new_day`; must be a bijection on the
    /// trip's day indices
    pub permutation: Vec<usize>,
}

/// Request to toggle a POI's visited flag.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub user: String,
    pub id: String,
}

/// Request to select a POI for detail display.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub user: String,
    pub id: String,
}

/// Request to resume the user's most recent trip.
#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    pub user: String,
}

/// Query for a specific saved trip.
#[derive(Debug, Deserialize)]
pub struct TripQuery {
    pub user: String,
    pub destination: String,
    pub day_count: usize,
}

/// Query for the user's most recent trip pointer.
#[derive(Debug, Deserialize)]
pub struct LastTripQuery {
    pub user: String,
}

/// A planned trip with everything the UI draws.
#[derive(Debug, Serialize)]
pub struct TripResponse {
    /// Destination the trip was planned for
    pub destination: String,

    /// Number of days
    pub day_count: usize,

    /// Travel mode chosen at planning time
    pub travel_mode: String,

    /// Per-day POI lists, one entry per day
    pub days: Vec<DayView>,

    /// Map markers for the not-yet-visited POIs
    pub markers: Vec<MarkerView>,
}

/// One day's list of places.
#[derive(Debug, Serialize)]
pub struct DayView {
    /// Day index (0-based)
    pub day: usize,

    /// Display label, e.g. "Day 1"
    pub label: String,

    /// Places scheduled for this day, in display order
    pub entries: Vec<PoiEntryView>,
}

/// A POI row in a day list.
#[derive(Debug, Serialize)]
pub struct PoiEntryView {
    pub id: String,
    pub name: String,
    pub visited: bool,

    /// Whether a description has been fetched for this place
    pub description_loaded: bool,
}

/// A map marker.
#[derive(Debug, Serialize)]
pub struct MarkerView {
    pub id: String,
    pub lat: f64,
    pub lon: f64,

    /// Marker color, keyed to the POI's day
    pub color: String,

    pub day: usize,
}

/// Detail view for one POI.
#[derive(Debug, Serialize)]
pub struct PoiDetailResponse {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub day: usize,
    pub visited: bool,

    /// Fetched description text, if the provider had one
    pub description: Option<String>,

    /// Whether a fetch has completed for this place
    pub description_loaded: bool,
}

/// The user's most recent trip pointer.
#[derive(Debug, Serialize)]
pub struct LastTripResponse {
    pub destination: String,
    pub day_count: usize,
    pub travel_mode: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl TripResponse {
    /// Build the response from a trip and its computed render set.
    pub fn from_state(trip: &Trip, set: RenderSet) -> Self {
        let days = set
            .days
            .into_iter()
            .map(|list| DayView {
                day: list.day,
                label: format!("Day {}", list.day + 1),
                entries: list
                    .entries
                    .into_iter()
                    .map(|e| PoiEntryView {
                        id: e.id,
                        name: e.name,
                        visited: e.visited,
                        description_loaded: e.description_loaded,
                    })
                    .collect(),
            })
            .collect();

        let markers = set
            .markers
            .into_iter()
            .map(|m| MarkerView {
                id: m.id,
                lat: m.coordinates.lat(),
                lon: m.coordinates.lon(),
                color: m.color.to_string(),
                day: m.day,
            })
            .collect();

        Self {
            destination: trip.destination().to_string(),
            day_count: trip.day_count(),
            travel_mode: trip.travel_mode().as_str().to_string(),
            days,
            markers,
        }
    }
}

impl PoiDetailResponse {
    /// Create from a domain POI.
    pub fn from_poi(poi: &Poi) -> Self {
        Self {
            id: poi.id.clone(),
            name: poi.name.clone(),
            lat: poi.coordinates.lat(),
            lon: poi.coordinates.lon(),
            day: poi.day,
            visited: poi.visited,
            description: poi.description.clone(),
            description_loaded: poi.description_loaded,
        }
    }
}

impl LastTripResponse {
    /// Create from a stored pointer.
    pub fn from_pointer(pointer: &LastTrip) -> Self {
        Self {
            destination: pointer.destination.clone(),
            day_count: pointer.day_count,
            travel_mode: pointer.travel_mode.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, TravelMode};
    use crate::sync::{MARKER_PALETTE, render};

    fn make_test_trip() -> Trip {
        let mut pois = vec![
            Poi::new(
                "w1",
                "Colosseum",
                Coord::new(41.8902, 12.4922).unwrap(),
                serde_json::Map::new(),
                0,
            ),
            Poi::new(
                "w2",
                "Pantheon",
                Coord::new(41.8986, 12.4769).unwrap(),
                serde_json::Map::new(),
                0,
            ),
            Poi::new(
                "w3",
                "Trevi Fountain",
                Coord::new(41.9009, 12.4833).unwrap(),
                serde_json::Map::new(),
                1,
            ),
        ];
        pois[1].visited = true;

        Trip::new("Rome", 2, TravelMode::Walking, pois).unwrap()
    }

    #[test]
    fn trip_response_from_state() {
        let trip = make_test_trip();
        let response = TripResponse::from_state(&trip, render(&trip));

        assert_eq!(response.destination, "Rome");
        assert_eq!(response.day_count, 2);
        assert_eq!(response.travel_mode, "walking");

        assert_eq!(response.days.len(), 2);
        assert_eq!(response.days[0].label, "Day 1");
        assert_eq!(response.days[1].label, "Day 2");
        assert_eq!(response.days[0].entries.len(), 2);
        assert_eq!(response.days[1].entries.len(), 1);
        assert!(response.days[0].entries[1].visited);
    }

    #[test]
    fn trip_response_markers_skip_visited() {
        let trip = make_test_trip();
        let response = TripResponse::from_state(&trip, render(&trip));

        let ids: Vec<&str> = response.markers.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["w1", "w3"]);

        assert_eq!(response.markers[0].color, MARKER_PALETTE[0]);
        assert_eq!(response.markers[1].color, MARKER_PALETTE[1]);
        assert!((response.markers[0].lat - 41.8902).abs() < 1e-9);
        assert!((response.markers[0].lon - 12.4922).abs() < 1e-9);
    }

    #[test]
    fn empty_day_still_gets_a_view() {
        let trip = Trip::new("Rome", 3, TravelMode::Driving, vec![]).unwrap();
        let response = TripResponse::from_state(&trip, render(&trip));

        assert_eq!(response.days.len(), 3);
        assert!(response.days.iter().all(|d| d.entries.is_empty()));
        assert!(response.markers.is_empty());
    }

    #[test]
    fn poi_detail_from_poi() {
        let trip = make_test_trip();
        let detail = PoiDetailResponse::from_poi(trip.poi("w1").unwrap());

        assert_eq!(detail.id, "w1");
        assert_eq!(detail.name, "Colosseum");
        assert_eq!(detail.day, 0);
        assert!(!detail.visited);
        assert!(detail.description.is_none());
        assert!(!detail.description_loaded);
    }

    #[test]
    fn last_trip_response_from_pointer() {
        let pointer = LastTrip::for_trip(&make_test_trip());
        let response = LastTripResponse::from_pointer(&pointer);

        assert_eq!(response.destination, "Rome");
        assert_eq!(response.day_count, 2);
        assert_eq!(response.travel_mode, "walking");
    }
}
