//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving ports, so they can be exercised with fixtures or mocks.

use std::sync::Arc;

use crate::domain::ports::{
    CheckpointCommand, FixtureCheckpointCommand, FixtureTrackingQuery, TrackingQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub checkpoints: Arc<dyn CheckpointCommand>,
    pub tracking: Arc<dyn TrackingQuery>,
}

impl HttpState {
    /// Bundle the driving ports used by the tracking handlers.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use tracking::domain::ports::{FixtureCheckpointCommand, FixtureTrackingQuery};
    /// use tracking::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureCheckpointCommand), Arc::new(FixtureTrackingQuery));
    /// # let _ = state;
    /// ```
    pub fn new(checkpoints: Arc<dyn CheckpointCommand>, tracking: Arc<dyn TrackingQuery>) -> Self {
        Self {
            checkpoints,
            tracking,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureCheckpointCommand), Arc::new(FixtureTrackingQuery))
    }
}
