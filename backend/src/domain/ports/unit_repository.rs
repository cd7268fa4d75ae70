//! Port for the keyed unit store.

use async_trait::async_trait;

use crate::domain::{CheckpointStatus, TrackingId, Unit, UnitId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by unit repository adapters.
    pub enum UnitRepositoryError {
        /// Backing store could not be reached.
        Connection { message: String } =>
            "unit repository connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "unit repository query failed: {message}",
    }
}

/// Keyed store of units.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitRepository: Send + Sync {
    async fn find_by_id(&self, id: &UnitId) -> Result<Option<Unit>, UnitRepositoryError>;

    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Option<Unit>, UnitRepositoryError>;

    /// Units whose current status is `status` or whose history contains it.
    ///
    /// `None` returns every unit.
    async fn find_by_status(
        &self,
        status: Option<CheckpointStatus>,
    ) -> Result<Vec<Unit>, UnitRepositoryError>;

    /// Replace the stored unit with the same id, inserting it if absent.
    async fn update(&self, unit: &Unit) -> Result<Unit, UnitRepositoryError>;

    async fn exists(&self, id: &UnitId) -> Result<bool, UnitRepositoryError>;
}
