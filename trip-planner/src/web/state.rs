//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::Trip;
use crate::places::PlaceRegistry;
use crate::planner::SequencerConfig;

/// Shared application state.
///
/// The trip sits behind a mutex: the core types do no locking of their
/// own, so every handler takes the lock for the whole of its edit.
#[derive(Clone)]
pub struct AppState {
    /// The trip being planned
    pub trip: Arc<Mutex<Trip>>,

    /// Place coordinates used for sequencing
    pub places: Arc<PlaceRegistry>,

    /// Sequencer configuration
    pub config: Arc<SequencerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(trip: Trip, places: PlaceRegistry, config: SequencerConfig) -> Self {
        Self {
            trip: Arc::new(Mutex::new(trip)),
            places: Arc::new(places),
            config: Arc::new(config),
        }
    }
}
