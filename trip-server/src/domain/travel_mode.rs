//! Travel mode types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown travel mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel mode: {0}")]
pub struct InvalidTravelMode(String);

/// How the user intends to get around at the destination.
///
/// Carried for display only: itinerary construction never routes
/// between places, so the mode has no effect on day assignment.
///
/// # Examples
///
/// ```
/// use trip_server::domain::TravelMode;
///
/// let mode: TravelMode = "walking".parse().unwrap();
/// assert_eq!(mode, TravelMode::Walking);
/// assert_eq!(mode.as_str(), "walking");
///
/// assert!("teleport".parse::<TravelMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
    Transit,
}

impl TravelMode {
    /// Returns the lowercase name used in requests and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Transit => "transit",
        }
    }
}

impl FromStr for TravelMode {
    type Err = InvalidTravelMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "transit" => Ok(TravelMode::Transit),
            _ => Err(InvalidTravelMode(s.to_string())),
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
