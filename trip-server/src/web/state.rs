//! Application state for the web layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::descriptions::CachedDescriptions;
use crate::places::PlacesClient;
use crate::planner::PlanConfig;
use crate::session::TripSession;
use crate::store::JsonFileStore;

/// Active sessions keyed by user.
pub type SessionMap = HashMap<String, TripSession<JsonFileStore>>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Active trip sessions. Commands are applied one at a time under
    /// this lock; nothing awaits while holding it.
    pub sessions: Arc<Mutex<SessionMap>>,

    /// Trip persistence backend
    pub store: Arc<JsonFileStore>,

    /// Place discovery and geocoding client
    pub places: Arc<PlacesClient>,

    /// Cached description fetcher
    pub descriptions: Arc<CachedDescriptions>,

    /// Itinerary planner configuration
    pub config: Arc<PlanConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        store: JsonFileStore,
        places: PlacesClient,
        descriptions: CachedDescriptions,
        config: PlanConfig,
    ) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            store: Arc::new(store),
            places: Arc::new(places),
            descriptions: Arc::new(descriptions),
            config: Arc::new(config),
        }
    }
}
