//! Driving port for registering checkpoints.
//!
//! Inbound adapters pass raw strings through; parsing and validation happen in
//! the service so every adapter reports the same errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Checkpoint, CheckpointId, CheckpointStatus, Error, TrackingId, TrackingValidationError, UnitId,
};

/// Request to register a checkpoint against a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCheckpointRequest {
    pub unit_id: String,
    pub tracking_id: String,
    /// Upper snake case status name, e.g. `IN_TRANSIT`.
    pub status: String,
    /// Event time; the registration time is used when absent.
    pub timestamp: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Serializable checkpoint returned by driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointPayload {
    pub id: CheckpointId,
    pub unit_id: UnitId,
    pub tracking_id: TrackingId,
    pub status: CheckpointStatus,
    pub timestamp: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Checkpoint> for CheckpointPayload {
    fn from(value: &Checkpoint) -> Self {
        Self {
            id: value.id().clone(),
            unit_id: value.unit_id().clone(),
            tracking_id: value.tracking_id().clone(),
            status: value.status(),
            timestamp: value.timestamp(),
            location: value.location().map(str::to_owned),
            description: value.description().map(str::to_owned),
            created_at: value.created_at(),
        }
    }
}

impl From<Checkpoint> for CheckpointPayload {
    fn from(value: Checkpoint) -> Self {
        Self::from(&value)
    }
}

/// Driving port for checkpoint registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckpointCommand: Send + Sync {
    /// Validate, deduplicate and record a checkpoint, then apply it to its
    /// unit.
    ///
    /// # Errors
    ///
    /// - `VALIDATION_ERROR` when `unit_id`, `tracking_id` or `status` is blank.
    /// - `INVALID_CHECKPOINT_STATUS` when `status` is not a known status.
    /// - `UNIT_NOT_FOUND` when the unit has not been provisioned.
    /// - `DUPLICATE_CHECKPOINT` when the same event was already recorded.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use tracking::domain::ports::{CheckpointCommand, FixtureCheckpointCommand, RegisterCheckpointRequest};
    /// # async fn example() -> Result<(), tracking::domain::Error> {
    /// let command = FixtureCheckpointCommand;
    /// let checkpoint = command
    ///     .register(RegisterCheckpointRequest {
    ///         unit_id: "UNIT001".to_owned(),
    ///         tracking_id: "TRK001".to_owned(),
    ///         status: "IN_TRANSIT".to_owned(),
    ///         ..RegisterCheckpointRequest::default()
    ///     })
    ///     .await?;
    /// assert_eq!(checkpoint.unit_id.as_str(), "UNIT001");
    /// # Ok(())
    /// # }
    /// ```
    async fn register(
        &self,
        request: RegisterCheckpointRequest,
    ) -> Result<CheckpointPayload, Error>;
}

/// Fixture command that echoes the request back without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCheckpointCommand;

#[async_trait]
impl CheckpointCommand for FixtureCheckpointCommand {
    async fn register(
        &self,
        request: RegisterCheckpointRequest,
    ) -> Result<CheckpointPayload, Error> {
        let invalid = |err: TrackingValidationError| Error::validation(err.to_string());
        let status = request
            .status
            .parse::<CheckpointStatus>()
            .map_err(|_| Error::invalid_checkpoint_status(&request.status))?;
        let now = Utc::now();
        Ok(CheckpointPayload {
            id: CheckpointId::random(),
            unit_id: UnitId::new(&request.unit_id).map_err(invalid)?,
            tracking_id: TrackingId::new(&request.tracking_id).map_err(invalid)?,
            status,
            timestamp: request.timestamp.unwrap_or(now),
            location: request.location,
            description: request.description,
            created_at: now,
        })
    }
}
