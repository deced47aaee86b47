//! Planning configuration for the itinerary builder.

/// Configuration parameters for itinerary planning.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Maximum number of POIs to schedule per day.
    pub per_day_cap: usize,

    /// Discovery radius granted per trip day (meters).
    pub radius_per_day_m: u32,

    /// Hard ceiling on the discovery radius (meters).
    /// Long trips never search beyond this.
    pub max_radius_m: u32,

    /// Maximum number of candidate places to request from discovery.
    pub discovery_limit: usize,

    /// Maximum number of description fetches to run concurrently.
    /// Higher values load descriptions faster but hit the provider harder.
    pub description_batch_size: usize,
}

impl PlanConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        per_day_cap: usize,
        radius_per_day_m: u32,
        max_radius_m: u32,
        discovery_limit: usize,
        description_batch_size: usize,
    ) -> Self {
        Self {
            per_day_cap,
            radius_per_day_m,
            max_radius_m,
            discovery_limit,
            description_batch_size,
        }
    }

    /// Returns the discovery radius for a trip of `day_count` days:
    /// `radius_per_day_m` per day, capped at `max_radius_m`.
    pub fn discovery_radius_m(&self, day_count: usize) -> u32 {
        let scaled = self
            .radius_per_day_m
            .saturating_mul(u32::try_from(day_count).unwrap_or(u32::MAX));
        scaled.min(self.max_radius_m)
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            per_day_cap: 5,
            radius_per_day_m: 3_000,
            max_radius_m: 10_000, // 10 km
            discovery_limit: 100,
            description_batch_size: 4,
        }
    }
}
