use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use trip_server::descriptions::{
    CacheConfig, CachedDescriptions, DescriptionClient, DescriptionClientConfig,
};
use trip_server::places::{PlacesClient, PlacesClientConfig};
use trip_server::planner::PlanConfig;
use trip_server::store::JsonFileStore;
use trip_server::web::{AppState, create_router};

/// Where trips are saved when TRIP_DATA_PATH is not set.
const DEFAULT_STORE_PATH: &str = "trips.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Get credentials from environment
    let api_key = std::env::var("PLACES_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: PLACES_API_KEY not set. API calls will fail.");
        String::new()
    });

    // Create places client
    let mut places_config = PlacesClientConfig::new(&api_key);
    if let Ok(base_url) = std::env::var("PLACES_BASE_URL") {
        places_config = places_config.with_base_url(base_url);
    }
    let places = PlacesClient::new(places_config).expect("Failed to create places client");

    // Create description client (keyless unless configured otherwise)
    let mut description_config = DescriptionClientConfig::new();
    if let Ok(base_url) = std::env::var("DESCRIPTIONS_BASE_URL") {
        description_config = description_config.with_base_url(base_url);
    }
    if let Ok(key) = std::env::var("DESCRIPTIONS_API_KEY") {
        description_config = description_config.with_api_key(key);
    }
    let description_client =
        DescriptionClient::new(description_config).expect("Failed to create description client");
    let descriptions = CachedDescriptions::new(description_client, &CacheConfig::default());

    // Open the trip store
    let store_path =
        std::env::var("TRIP_DATA_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
    let store = JsonFileStore::open(&store_path);
    println!("Saving trips to {store_path}");

    // Build app state
    let state = AppState::new(store, places, descriptions, PlanConfig::default());

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|a| a.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));
    println!("Trip Planner listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health                - Health check");
    println!("  POST /api/plan              - Plan a trip");
    println!("  GET  /api/trip              - Fetch a saved trip");
    println!("  GET  /api/last-trip         - Fetch the last-trip pointer");
    println!("  POST /api/resume            - Resume the most recent trip");
    println!("  POST /api/trip/move         - Move a place to a day/position");
    println!("  POST /api/trip/reorder-days - Remap days through a permutation");
    println!("  POST /api/trip/toggle       - Toggle a place's visited flag");
    println!("  POST /api/trip/select       - Fetch detail for one place");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
