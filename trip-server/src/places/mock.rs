//! Mock places client for testing without API access.
//!
//! Loads canned geocoding and discovery responses from JSON files and
//! serves them as if they were live API responses.

use std::path::PathBuf;

use crate::domain::Coord;
use crate::planner::Candidate;

use super::client::{GeonameDto, PlaceDto};
use super::error::PlacesError;

/// Mock places client that serves data from JSON files.
///
/// This is useful for development and testing without real API
/// credentials. Expects one `geoname-{name}.json` per destination
/// (name lowercased, spaces replaced with dashes) and a `radius.json`
/// holding the discovery response for that area.
#[derive(Debug, Clone)]
pub struct MockPlacesClient {
    data_dir: PathBuf,
}

impl MockPlacesClient {
    /// Create a new mock client serving fixtures from a directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn read_fixture(&self, file: &str) -> Result<String, PlacesError> {
        let path = self.data_dir.join(file);
        std::fs::read_to_string(&path).map_err(|e| PlacesError::Fixture {
            message: format!("failed to read {:?}: {}", path, e),
        })
    }

    /// Geocode a destination from its fixture file.
    ///
    /// Mimics the real `PlacesClient::geocode` interface. A missing
    /// fixture behaves like an unknown destination.
    pub async fn geocode(&self, name: &str) -> Result<Coord, PlacesError> {
        let file = format!("geoname-{}.json", name.to_lowercase().replace(' ', "-"));
        let json = self
            .read_fixture(&file)
            .map_err(|_| PlacesError::DestinationNotFound(name.to_string()))?;

        let geoname: GeonameDto = serde_json::from_str(&json).map_err(|e| PlacesError::Json {
            message: e.to_string(),
        })?;

        let (Some(lat), Some(lon)) = (geoname.lat, geoname.lon) else {
            return Err(PlacesError::DestinationNotFound(name.to_string()));
        };

        Coord::new(lat, lon).map_err(|_| PlacesError::DestinationNotFound(name.to_string()))
    }

    /// Discover places from the `radius.json` fixture.
    ///
    /// Mimics the real `PlacesClient::discover` interface. The origin
    /// and radius are ignored - fixture data is static - but `limit`
    /// is honored.
    pub async fn discover(
        &self,
        _origin: Coord,
        _radius_m: u32,
        limit: usize,
    ) -> Result<Vec<Candidate>, PlacesError> {
        let json = self.read_fixture("radius.json")?;

        let places: Vec<PlaceDto> = serde_json::from_str(&json).map_err(|e| PlacesError::Json {
            message: e.to_string(),
        })?;

        let mut candidates: Vec<Candidate> = places
            .into_iter()
            .filter_map(PlaceDto::into_candidate)
            .collect();
        candidates.truncate(limit);
        Ok(candidates)
    }
}
