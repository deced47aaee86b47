//! Coordinate types and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers, used by [`distance_km`].
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when constructing an invalid coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoord {
    reason: &'static str,
}

/// A validated latitude/longitude pair in decimal degrees.
///
/// Latitude is in `[-90, 90]`, longitude in `[-180, 180]`, and both are
/// finite. This type guarantees that any `Coord` value is valid by
/// construction.
///
/// # Examples
///
/// ```
/// use trip_server::domain::Coord;
///
/// let rome = Coord::new(41.9028, 12.4964).unwrap();
/// assert_eq!(rome.lat(), 41.9028);
/// assert_eq!(rome.lon(), 12.4964);
///
/// // Out-of-range values are rejected
/// assert!(Coord::new(91.0, 0.0).is_err());
/// assert!(Coord::new(0.0, 180.5).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoord")]
pub struct Coord {
    lat: f64,
    lon: f64,
}

/// Unvalidated wire form. Deserialization funnels through
/// [`Coord::new`] so stored payloads cannot bypass the range checks.
#[derive(Deserialize)]
struct RawCoord {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoord> for Coord {
    type Error = InvalidCoord;

    fn try_from(raw: RawCoord) -> Result<Self, Self::Error> {
        Coord::new(raw.lat, raw.lon)
    }
}

impl Coord {
    /// Construct a coordinate from decimal degrees.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either value is non-finite, if latitude is
    /// outside `[-90, 90]`, or if longitude is outside `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoord> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoord {
                reason: "must be finite numbers",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoord {
                reason: "latitude must be in [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoord {
                reason: "longitude must be in [-180, 180]",
            });
        }

        Ok(Coord { lat, lon })
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Great-circle distance between two coordinates in kilometers.
///
/// Uses the haversine formula with a mean Earth radius of 6371 km,
/// which is plenty for ranking places by how far they are from a trip's
/// origin. Pure and deterministic.
///
/// # Examples
///
/// ```
/// use trip_server::domain::{Coord, distance_km};
///
/// let rome = Coord::new(41.9028, 12.4964).unwrap();
/// let naples = Coord::new(40.8518, 14.2681).unwrap();
///
/// let d = distance_km(rome, naples);
/// assert!((d - 188.4).abs() < 1.0);
/// ```
pub fn distance_km(a: Coord, b: Coord) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Float error can push h just past 1 for near-antipodal pairs,
    // which would make asin return NaN
    EARTH_RADIUS_KM * 2.0 * h.min(1.0).sqrt().asin()
}
