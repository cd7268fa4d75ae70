//! Builders wiring the in-memory store into the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use tracking::domain::ports::{CheckpointIdGenerator, UuidCheckpointIdGenerator};
use tracking::domain::{CheckpointCommandService, TrackingQueryService};
use tracking::inbound::http::state::HttpState;
use tracking::outbound::memory::InMemoryTrackingStore;

use super::ServerConfig;

/// Create the store described by `config`.
pub(crate) fn build_store(config: &ServerConfig, clock: &dyn Clock) -> InMemoryTrackingStore {
    if config.seed_reference_units {
        info!(tolerance = %config.tolerance, "seeding reference units");
        InMemoryTrackingStore::with_reference_units(clock, config.tolerance)
    } else {
        InMemoryTrackingStore::new(config.tolerance)
    }
}

/// Wire the command and query services over a single shared store.
pub(crate) fn build_http_state_with(
    store: Arc<InMemoryTrackingStore>,
    ids: Arc<dyn CheckpointIdGenerator>,
    clock: Arc<dyn Clock>,
) -> HttpState {
    let command = CheckpointCommandService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        ids,
        clock,
    );
    let query = TrackingQueryService::new(Arc::clone(&store), store);
    HttpState::new(Arc::new(command), Arc::new(query))
}

/// Production wiring: system clock and UUID checkpoint ids.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let store = Arc::new(build_store(config, clock.as_ref()));
    build_http_state_with(store, Arc::new(UuidCheckpointIdGenerator), clock)
}
