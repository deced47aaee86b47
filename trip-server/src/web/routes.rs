//! HTTP route handlers.

use std::str::FromStr;
use std::sync::MutexGuard;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use futures::future::join_all;

use crate::domain::{DomainError, TravelMode};
use crate::places::PlacesError;
use crate::planner::build_trip;
use crate::session::{SessionError, TripSession};
use crate::store::{JsonFileStore, StoreError, TripStore};
use crate::sync::render;

use super::dto::*;
use super::state::{AppState, SessionMap};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/plan", post(plan_trip))
        .route("/api/trip", get(get_trip))
        .route("/api/last-trip", get(get_last_trip))
        .route("/api/resume", post(resume_trip))
        .route("/api/trip/move", post(move_poi))
        .route("/api/trip/reorder-days", post(reorder_days))
        .route("/api/trip/toggle", post(toggle_visited))
        .route("/api/trip/select", post(select_poi))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan a fresh trip for a destination.
async fn plan_trip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TripResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanTripRequest = serde_json::from_slice(&body).map_err(|e| {
        eprintln!("[JSON parse error] {e}");
        eprintln!("[Body] {}", String::from_utf8_lossy(&body));
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    // Validate the request up front
    if req.user.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "user must not be empty".to_string(),
        });
    }
    if req.destination.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "destination must not be empty".to_string(),
        });
    }
    if req.day_count == 0 {
        return Err(AppError::BadRequest {
            message: "day count must be at least 1".to_string(),
        });
    }
    let travel_mode = TravelMode::from_str(&req.travel_mode).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    // Geocode the destination, then discover candidate places around it
    let origin = state.places.geocode(&req.destination).await?;
    let radius_m = state.config.discovery_radius_m(req.day_count);
    let candidates = state
        .places
        .discover(origin, radius_m, state.config.discovery_limit)
        .await?;

    let trip = build_trip(
        &req.destination,
        req.day_count,
        travel_mode,
        origin,
        candidates,
        &state.config,
    )?;

    let store = TripStore::new(state.store.clone());
    let session = TripSession::start(req.user.clone(), trip, store)?;

    let response = TripResponse::from_state(session.trip(), session.render_set());
    let pending = pending_descriptions(&session);

    {
        let mut sessions = lock_sessions(&state)?;
        sessions.insert(req.user.clone(), session);
    }

    spawn_description_prefetch(state, req.user, pending);

    Ok(Json(response))
}

/// Fetch a specific saved trip.
async fn get_trip(
    State(state): State<AppState>,
    Query(req): Query<TripQuery>,
) -> Result<Json<TripResponse>, AppError> {
    let store = TripStore::new(state.store.clone());
    let trip = store
        .load_trip(&req.user, &req.destination, req.day_count)
        .ok_or_else(|| AppError::NotFound {
            message: "no saved trip".to_string(),
        })?;

    let set = render(&trip);
    Ok(Json(TripResponse::from_state(&trip, set)))
}

/// Fetch the user's most recent trip pointer.
async fn get_last_trip(
    State(state): State<AppState>,
    Query(req): Query<LastTripQuery>,
) -> Result<Json<LastTripResponse>, AppError> {
    let store = TripStore::new(state.store.clone());
    let pointer = store
        .load_last_trip(&req.user)
        .ok_or_else(|| AppError::NotFound {
            message: "no saved trip".to_string(),
        })?;

    Ok(Json(LastTripResponse::from_pointer(&pointer)))
}

/// Resume the user's most recent trip.
async fn resume_trip(
    State(state): State<AppState>,
    Json(req): Json<ResumeRequest>,
) -> Result<Json<TripResponse>, AppError> {
    let store = TripStore::new(state.store.clone());
    let session =
        TripSession::resume(req.user.clone(), store).ok_or_else(|| AppError::NotFound {
            message: "no saved trip".to_string(),
        })?;

    let response = TripResponse::from_state(session.trip(), session.render_set());
    let pending = pending_descriptions(&session);

    {
        let mut sessions = lock_sessions(&state)?;
        sessions.insert(req.user.clone(), session);
    }

    spawn_description_prefetch(state, req.user, pending);

    Ok(Json(response))
}

/// Move a POI to a new day and position.
async fn move_poi(
    State(state): State<AppState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<TripResponse>, AppError> {
    let mut sessions = lock_sessions(&state)?;
    let session = active_session(&mut sessions, &req.user)?;

    let set = session.apply_move(&req.id, req.day, req.position)?;
    Ok(Json(TripResponse::from_state(session.trip(), set)))
}

/// Remap the trip's days through a permutation.
async fn reorder_days(
    State(state): State<AppState>,
    Json(req): Json<ReorderDaysRequest>,
) -> Result<Json<TripResponse>, AppError> {
    let mut sessions = lock_sessions(&state)?;
    let session = active_session(&mut sessions, &req.user)?;

    let set = session.apply_day_reorder(&req.permutation)?;
    Ok(Json(TripResponse::from_state(session.trip(), set)))
}

/// Toggle a POI's visited flag.
async fn toggle_visited(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<TripResponse>, AppError> {
    let mut sessions = lock_sessions(&state)?;
    let session = active_session(&mut sessions, &req.user)?;

    let set = session.apply_toggle(&req.id)?;
    Ok(Json(TripResponse::from_state(session.trip(), set)))
}

/// Fetch detail for one POI, kicking off a description fetch if needed.
async fn select_poi(
    State(state): State<AppState>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<PoiDetailResponse>, AppError> {
    let (response, pending) = {
        let mut sessions = lock_sessions(&state)?;
        let session = active_session(&mut sessions, &req.user)?;

        let poi = session
            .trip()
            .poi(&req.id)
            .ok_or_else(|| AppError::NotFound {
                message: format!("no such place: {}", req.id),
            })?;

        let pending = if poi.description_loaded {
            Vec::new()
        } else {
            vec![(poi.id.clone(), poi.name.clone())]
        };

        (PoiDetailResponse::from_poi(poi), pending)
    };

    spawn_description_prefetch(state, req.user, pending);

    Ok(Json(response))
}

/// Lock the session map, reporting poisoning as an internal error.
fn lock_sessions(state: &AppState) -> Result<MutexGuard<'_, SessionMap>, AppError> {
    state.sessions.lock().map_err(|_| AppError::Internal {
        message: "session lock poisoned".to_string(),
    })
}

/// Look up the caller's active session.
fn active_session<'a>(
    sessions: &'a mut SessionMap,
    user: &str,
) -> Result<&'a mut TripSession<JsonFileStore>, AppError> {
    sessions.get_mut(user).ok_or_else(|| AppError::NotFound {
        message: format!("no active trip for user {user}"),
    })
}

/// Places in the session's trip that still need a description.
fn pending_descriptions(session: &TripSession<JsonFileStore>) -> Vec<(String, String)> {
    session
        .trip()
        .pois()
        .iter()
        .filter(|p| !p.description_loaded)
        .map(|p| (p.id.clone(), p.name.clone()))
        .collect()
}

/// Fetch descriptions in the background and write them into the session
/// as they land.
///
/// Failures are logged and skipped; the trip works fine without them.
fn spawn_description_prefetch(state: AppState, user: String, pois: Vec<(String, String)>) {
    if pois.is_empty() {
        return;
    }

    tokio::spawn(async move {
        let batch_size = state.config.description_batch_size.max(1);

        for chunk in pois.chunks(batch_size) {
            let fetches = chunk.iter().map(|(_, name)| state.descriptions.fetch(name));
            let results = join_all(fetches).await;

            for ((id, name), result) in chunk.iter().zip(results) {
                let description = match result {
                    Ok(description) => description,
                    Err(e) => {
                        eprintln!("Warning: failed to fetch description for {name}: {e}");
                        continue;
                    }
                };

                // The session may have been replaced while we were
                // fetching; a missing one means the work is obsolete.
                let Ok(mut sessions) = state.sessions.lock() else {
                    return;
                };
                let Some(session) = sessions.get_mut(&user) else {
                    return;
                };
                if let Err(e) = session.apply_description(id, description) {
                    eprintln!("Warning: failed to persist description for {name}: {e}");
                }
            }
        }
    });
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Rejected(inner) => AppError::BadRequest {
                message: inner.to_string(),
            },
            SessionError::Persist(inner) => AppError::Internal {
                message: inner.to_string(),
            },
        }
    }
}

impl From<PlacesError> for AppError {
    fn from(e: PlacesError) -> Self {
        match e {
            PlacesError::DestinationNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        // Log errors to stderr for debugging
        eprintln!("[{status}] {message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
