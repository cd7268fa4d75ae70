//! Port for the append-only checkpoint store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Checkpoint, CheckpointStatus, TrackingId, UnitId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by checkpoint repository adapters.
    pub enum CheckpointRepositoryError {
        /// Backing store could not be reached.
        Connection { message: String } =>
            "checkpoint repository connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "checkpoint repository query failed: {message}",
    }
}

/// Append-only store of checkpoints.
///
/// Checkpoints are never updated or removed once created.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckpointRepository: Send + Sync {
    /// Store a checkpoint and return the stored value.
    async fn create(
        &self,
        checkpoint: &Checkpoint,
    ) -> Result<Checkpoint, CheckpointRepositoryError>;

    /// All checkpoints recorded for a tracking id, in no particular order.
    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Vec<Checkpoint>, CheckpointRepositoryError>;

    /// All checkpoints recorded for a unit, in no particular order.
    async fn find_by_unit_id(
        &self,
        unit_id: &UnitId,
    ) -> Result<Vec<Checkpoint>, CheckpointRepositoryError>;

    /// Whether a checkpoint for the same unit and status lies within the
    /// store's duplicate tolerance of `timestamp`.
    async fn exists(
        &self,
        unit_id: &UnitId,
        status: CheckpointStatus,
        timestamp: DateTime<Utc>,
    ) -> Result<bool, CheckpointRepositoryError>;
}
