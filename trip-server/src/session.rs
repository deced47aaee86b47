//! One user's live planning session.
//!
//! A session owns the in-memory trip and runs the mutate, save, render
//! sequence for every command: the trip is edited, the full snapshot is
//! written through the store, and only then is the new render set
//! handed back. A command that fails validation changes nothing and
//! persists nothing.

use thiserror::Error;
use tracing::debug;

use crate::domain::{DomainError, Trip};
use crate::store::{KvStore, StoreError, TripStore};
use crate::sync::{RenderSet, render};

/// Errors from applying a session command.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The command was rejected before touching the trip.
    #[error("invalid command: {0}")]
    Rejected(#[from] DomainError),

    /// The edit applied in memory but could not be persisted.
    #[error("failed to persist trip: {0}")]
    Persist(#[from] StoreError),
}

/// A live planning session for one user and one trip.
pub struct TripSession<S> {
    user: String,
    trip: Trip,
    store: TripStore<S>,
}

impl<S: KvStore> TripSession<S> {
    /// Start a session for a freshly planned trip, persisting the trip
    /// and the user's last-trip pointer before returning.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the initial save fails.
    pub fn start(
        user: impl Into<String>,
        trip: Trip,
        store: TripStore<S>,
    ) -> Result<Self, StoreError> {
        let user = user.into();
        store.save_trip(&user, &trip)?;
        store.save_last_trip(&user, &trip)?;
        Ok(Self { user, trip, store })
    }

    /// Resume the user's most recent trip.
    ///
    /// Returns `None` if there is no last-trip pointer, or the trip it
    /// points at is missing or unreadable.
    pub fn resume(user: impl Into<String>, store: TripStore<S>) -> Option<Self> {
        let user = user.into();
        let pointer = store.load_last_trip(&user)?;
        let trip = store.load_trip(&user, &pointer.destination, pointer.day_count)?;
        Some(Self { user, trip, store })
    }

    /// The session's user.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The current trip.
    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    /// The current view, without applying any change.
    pub fn render_set(&self) -> RenderSet {
        render(&self.trip)
    }

    /// Move a POI to a day and position, then persist and re-render.
    ///
    /// An unknown id is a no-op that still returns the current view.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the target day is out of range (nothing is
    /// changed or saved), or if the save fails.
    pub fn apply_move(
        &mut self,
        id: &str,
        day: usize,
        position: usize,
    ) -> Result<RenderSet, SessionError> {
        let moved = self.trip.move_poi(id, day, position)?;
        debug!(user = %self.user, id, day, position, moved, "move poi");
        self.save_and_render()
    }

    /// Remap days through a permutation, then persist and re-render.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an invalid permutation or a failed save.
    pub fn apply_day_reorder(&mut self, permutation: &[usize]) -> Result<RenderSet, SessionError> {
        self.trip.reorder_days(permutation)?;
        debug!(user = %self.user, ?permutation, "reorder days");
        self.save_and_render()
    }

    /// Toggle a POI's visited flag, then persist and re-render.
    ///
    /// # Errors
    ///
    /// Returns `Err` only if the save fails.
    pub fn apply_toggle(&mut self, id: &str) -> Result<RenderSet, SessionError> {
        let toggled = self.trip.toggle_visited(id);
        debug!(user = %self.user, id, toggled, "toggle visited");
        self.save_and_render()
    }

    /// Record a fetched description, if the POI still exists.
    ///
    /// Persists only when something was written; a completion for a POI
    /// that is gone is dropped. Returns whether the description landed.
    ///
    /// # Errors
    ///
    /// Returns `Err` only if the save fails.
    pub fn apply_description(
        &mut self,
        id: &str,
        description: Option<String>,
    ) -> Result<bool, SessionError> {
        if !self.trip.set_description(id, description) {
            return Ok(false);
        }
        debug!(user = %self.user, id, "description loaded");
        self.store.save_trip(&self.user, &self.trip)?;
        Ok(true)
    }

    fn save_and_render(&self) -> Result<RenderSet, SessionError> {
        self.store.save_trip(&self.user, &self.trip)?;
        Ok(render(&self.trip))
    }
}
