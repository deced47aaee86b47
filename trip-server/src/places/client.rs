//! Places API client for geocoding and nearby discovery.
//!
//! Shaped around the OpenTripMap places API: one endpoint turns a
//! destination name into coordinates, another lists interesting places
//! within a radius of a point.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::Coord;
use crate::planner::Candidate;

use super::error::PlacesError;

/// Default base URL for the places API (OpenTripMap).
const DEFAULT_BASE_URL: &str = "https://api.opentripmap.com/0.1/en/places";

/// Geocoding response: where a named place is.
#[derive(Debug, Deserialize)]
pub struct GeonameDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// One discovered place. We only read the id, name and point; every
/// other field the provider sends is collected into `tags` and passed
/// through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDto {
    pub xid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub point: Option<PointDto>,
    #[serde(flatten)]
    pub tags: Map<String, Value>,
}

/// Coordinates of a discovered place.
#[derive(Debug, Clone, Deserialize)]
pub struct PointDto {
    pub lat: f64,
    pub lon: f64,
}

impl PlaceDto {
    /// Convert to a planner candidate.
    ///
    /// Returns `None` if the place has no usable coordinates; such
    /// entries are dropped rather than failing the whole discovery.
    pub fn into_candidate(self) -> Option<Candidate> {
        let point = self.point?;
        let coordinates = Coord::new(point.lat, point.lon).ok()?;
        Some(Candidate::new(self.xid, self.name, coordinates).with_tags(self.tags))
    }
}

/// Configuration for the places API client.
#[derive(Debug, Clone)]
pub struct PlacesClientConfig {
    /// API key passed as the `apikey` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlacesClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the places API.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    /// Create a new places API client.
    pub fn new(config: PlacesClientConfig) -> Result<Self, PlacesError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Geocode a destination name to coordinates.
    ///
    /// # Errors
    ///
    /// Returns `DestinationNotFound` when the provider does not know
    /// the name or answers without coordinates; other variants cover
    /// transport, auth and parse failures.
    pub async fn geocode(&self, name: &str) -> Result<Coord, PlacesError> {
        let url = format!("{}/geoname", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("name", name), ("apikey", &self.api_key)])
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PlacesError::Unauthorized);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PlacesError::DestinationNotFound(name.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let geoname: GeonameDto = serde_json::from_str(&body).map_err(|e| PlacesError::Json {
            message: e.to_string(),
        })?;

        let (Some(lat), Some(lon)) = (geoname.lat, geoname.lon) else {
            return Err(PlacesError::DestinationNotFound(name.to_string()));
        };

        Coord::new(lat, lon).map_err(|_| PlacesError::DestinationNotFound(name.to_string()))
    }

    /// List interesting places within `radius_m` meters of `origin`,
    /// up to `limit` results.
    pub async fn discover(
        &self,
        origin: Coord,
        radius_m: u32,
        limit: usize,
    ) -> Result<Vec<Candidate>, PlacesError> {
        let url = format!("{}/radius", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("radius", radius_m.to_string()),
                ("lat", origin.lat().to_string()),
                ("lon", origin.lon().to_string()),
                ("limit", limit.to_string()),
                ("format", "json".to_string()),
                ("apikey", self.api_key.clone()),
            ])
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PlacesError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let places: Vec<PlaceDto> = serde_json::from_str(&body).map_err(|e| PlacesError::Json {
            message: e.to_string(),
        })?;

        Ok(places
            .into_iter()
            .filter_map(PlaceDto::into_candidate)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = PlacesClientConfig::new("test-api-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_base_url() {
        let config = PlacesClientConfig::new("test-api-key").with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn place_dto_collects_extra_fields_as_tags() {
        let json = r#"{
            "xid": "W123",
            "name": "Colosseum",
            "point": {"lat": 41.8902, "lon": 12.4922},
            "kinds": "historic,amphitheatres",
            "rate": 7,
            "dist": 812.5
        }"#;

        let dto: PlaceDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.xid, "W123");
        assert_eq!(dto.tags.get("kinds"), Some(&serde_json::json!("historic,amphitheatres")));
        assert_eq!(dto.tags.get("rate"), Some(&serde_json::json!(7)));

        let candidate = dto.into_candidate().unwrap();
        assert_eq!(candidate.id, "W123");
        assert_eq!(candidate.name.as_deref(), Some("Colosseum"));
        assert_eq!(candidate.tags.get("dist"), Some(&serde_json::json!(812.5)));
    }

    #[test]
    fn place_without_point_is_dropped() {
        let json = r#"{"xid": "W1", "name": "Nowhere"}"#;
        let dto: PlaceDto = serde_json::from_str(json).unwrap();
        assert!(dto.into_candidate().is_none());
    }

    #[test]
    fn place_with_invalid_point_is_dropped() {
        let json = r#"{"xid": "W1", "name": "Offworld", "point": {"lat": 99.0, "lon": 0.0}}"#;
        let dto: PlaceDto = serde_json::from_str(json).unwrap();
        assert!(dto.into_candidate().is_none());
    }

    #[test]
    fn geoname_without_coordinates_parses() {
        let json = r#"{"name": "Atlantis"}"#;
        let dto: GeonameDto = serde_json::from_str(json).unwrap();
        assert!(dto.lat.is_none());
        assert!(dto.lon.is_none());
    }
}
