//! Driving port for tracking history and status queries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CheckpointPayload;
use crate::domain::{CheckpointStatus, Error, TrackingId, Unit, UnitId};

/// Request for the checkpoint history behind a tracking id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTrackingHistoryRequest {
    pub tracking_id: String,
}

/// Checkpoint history of one unit, most recent event first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingHistoryResponse {
    pub unit_id: UnitId,
    pub tracking_id: TrackingId,
    pub current_status: CheckpointStatus,
    pub checkpoints: Vec<CheckpointPayload>,
}

/// Request for units that are or have been in a status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUnitsByStatusRequest {
    /// Status name; `CREATED` is assumed when absent or blank.
    pub status: Option<String>,
}

/// Serializable unit returned by driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPayload {
    pub id: UnitId,
    pub tracking_id: TrackingId,
    pub current_status: CheckpointStatus,
    /// Applied checkpoints in application order.
    pub checkpoint_history: Vec<CheckpointPayload>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl From<&Unit> for UnitPayload {
    fn from(value: &Unit) -> Self {
        Self {
            id: value.id().clone(),
            tracking_id: value.tracking_id().clone(),
            current_status: value.current_status(),
            checkpoint_history: value
                .checkpoint_history()
                .iter()
                .map(CheckpointPayload::from)
                .collect(),
            created_at: value.created_at(),
            last_updated: value.last_updated(),
        }
    }
}

/// Units matching a status query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUnitsByStatusResponse {
    pub units: Vec<UnitPayload>,
}

/// Driving port for read-only tracking queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackingQuery: Send + Sync {
    /// Resolve a tracking id to its unit and return the unit's checkpoints,
    /// sorted by event time descending. Ties keep their recorded order.
    ///
    /// # Errors
    ///
    /// `VALIDATION_ERROR` for a blank tracking id and `TRACKING_NOT_FOUND`
    /// when no unit carries it.
    async fn tracking_history(
        &self,
        request: GetTrackingHistoryRequest,
    ) -> Result<TrackingHistoryResponse, Error>;

    /// List units whose current status or history includes the requested
    /// status.
    ///
    /// # Errors
    ///
    /// `INVALID_CHECKPOINT_STATUS` when the status is not recognised.
    async fn units_by_status(
        &self,
        request: ListUnitsByStatusRequest,
    ) -> Result<ListUnitsByStatusResponse, Error>;
}

/// Fixture query knowing no units.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTrackingQuery;

#[async_trait]
impl TrackingQuery for FixtureTrackingQuery {
    async fn tracking_history(
        &self,
        request: GetTrackingHistoryRequest,
    ) -> Result<TrackingHistoryResponse, Error> {
        Err(Error::tracking_not_found(&request.tracking_id))
    }

    async fn units_by_status(
        &self,
        _request: ListUnitsByStatusRequest,
    ) -> Result<ListUnitsByStatusResponse, Error> {
        Ok(ListUnitsByStatusResponse::default())
    }
}
