//! Domain error types.
//!
//! These errors represent rejected inputs in the domain layer: requests
//! that must be refused before any trip state changes. They are distinct
//! from collaborator and persistence errors.

/// Domain-level errors for trip validation and structural edits.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A trip must cover at least one day
    #[error("day count must be at least 1, got {0}")]
    InvalidDayCount(usize),

    /// A trip needs a destination name
    #[error("destination must not be empty")]
    EmptyDestination,

    /// Day index outside the trip's day range
    #[error("day {day} is out of range for a {day_count}-day trip")]
    DayOutOfRange { day: usize, day_count: usize },

    /// Two POIs in one trip share an id
    #[error("duplicate POI id: {0}")]
    DuplicatePoiId(String),

    /// A day permutation was malformed
    #[error("invalid day permutation: {0}")]
    InvalidPermutation(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidDayCount(0);
        assert_eq!(err.to_string(), "day count must be at least 1, got 0");

        let err = DomainError::EmptyDestination;
        assert_eq!(err.to_string(), "destination must not be empty");

        let err = DomainError::DayOutOfRange { day: 5, day_count: 3 };
        assert_eq!(err.to_string(), "day 5 is out of range for a 3-day trip");

        let err = DomainError::DuplicatePoiId("abc123".into());
        assert_eq!(err.to_string(), "duplicate POI id: abc123");

        let err = DomainError::InvalidPermutation("length must equal day count");
        assert_eq!(
            err.to_string(),
            "invalid day permutation: length must equal day count"
        );
    }
}
