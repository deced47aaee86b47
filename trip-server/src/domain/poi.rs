//! Point-of-interest types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Coord;

/// A single visitable place within a trip.
///
/// POIs come from the discovery provider; whatever metadata the
/// provider attached travels along in `tags`, untouched. `day` is the
/// index of the day the place is currently assigned to; the builder
/// sets it initially and structural edits are the only things that
/// change it afterwards.
///
/// The serialized form of this struct is the persisted trip payload,
/// so field names are part of the storage contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poi {
    /// Stable provider identifier, unique within a trip.
    pub id: String,

    /// Display name. Candidates without one never become POIs.
    pub name: String,

    /// Location of the place.
    pub coordinates: Coord,

    /// Opaque provider metadata, passed through unmodified.
    #[serde(default)]
    pub tags: serde_json::Map<String, Value>,

    /// Day index within the owning trip, always in `[0, day_count)`.
    pub day: usize,

    /// Whether the user has marked this place as visited.
    #[serde(default)]
    pub visited: bool,

    /// Narrative text, populated lazily by the description provider.
    #[serde(default)]
    pub description: Option<String>,

    /// True once a description fetch has completed for this place,
    /// even if it came back empty-handed.
    #[serde(default)]
    pub description_loaded: bool,
}

impl Poi {
    /// Create a fresh POI: not visited, description not yet fetched.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coordinates: Coord,
        tags: serde_json::Map<String, Value>,
        day: usize,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
            tags,
            day,
            visited: false,
            description: None,
            description_loaded: false,
        }
    }
}
