//! Checkpoint event entity.

use chrono::{DateTime, Utc};

use super::{CheckpointId, CheckpointStatus, DuplicateTolerance, TrackingId, UnitId};

/// Input payload for [`Checkpoint::new`].
#[derive(Debug, Clone)]
pub struct CheckpointDraft {
    pub id: CheckpointId,
    pub unit_id: UnitId,
    pub tracking_id: TrackingId,
    pub status: CheckpointStatus,
    pub timestamp: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Immutable record that a unit reached a status at a point in time.
///
/// `timestamp` is the event time reported by the caller; `created_at` is when
/// the record was written. The two are independent.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use tracking::domain::{
///     Checkpoint, CheckpointDraft, CheckpointId, CheckpointStatus, TrackingId, UnitId,
/// };
///
/// let at = Utc.with_ymd_and_hms(2025, 9, 30, 12, 0, 0).single().expect("valid time");
/// let checkpoint = Checkpoint::new(CheckpointDraft {
///     id: CheckpointId::new("cp-1").expect("id"),
///     unit_id: UnitId::new("UNIT001").expect("unit"),
///     tracking_id: TrackingId::new("TRK001").expect("tracking"),
///     status: CheckpointStatus::PickedUp,
///     timestamp: at,
///     location: Some("Depot 4".to_owned()),
///     description: None,
///     created_at: at,
/// });
/// assert_eq!(checkpoint.status(), CheckpointStatus::PickedUp);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub(super) id: CheckpointId,
    pub(super) unit_id: UnitId,
    pub(super) tracking_id: TrackingId,
    pub(super) status: CheckpointStatus,
    pub(super) timestamp: DateTime<Utc>,
    pub(super) location: Option<String>,
    pub(super) description: Option<String>,
    pub(super) created_at: DateTime<Utc>,
}

impl Checkpoint {
    /// Build a checkpoint from already validated parts.
    pub fn new(draft: CheckpointDraft) -> Self {
        Self::from(draft)
    }

    /// Checkpoint identifier.
    pub fn id(&self) -> &CheckpointId {
        &self.id
    }

    /// Unit the checkpoint was recorded against.
    pub fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    /// Tracking number supplied with the checkpoint.
    pub fn tracking_id(&self) -> &TrackingId {
        &self.tracking_id
    }

    /// Status the unit reached at this checkpoint.
    pub fn status(&self) -> CheckpointStatus {
        self.status
    }

    /// Event time reported for the checkpoint.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Free-form location, if one was reported.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Free-form description, if one was reported.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Time the record was written.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether this checkpoint records the same event as the given triple.
    ///
    /// Events match when unit and status are equal and the timestamps lie
    /// strictly within `tolerance` of each other.
    pub fn is_near_duplicate_of(
        &self,
        unit_id: &UnitId,
        status: CheckpointStatus,
        timestamp: DateTime<Utc>,
        tolerance: DuplicateTolerance,
    ) -> bool {
        self.unit_id == *unit_id
            && self.status == status
            && tolerance.covers(self.timestamp, timestamp)
    }
}

impl From<CheckpointDraft> for Checkpoint {
    fn from(draft: CheckpointDraft) -> Self {
        let CheckpointDraft {
            id,
            unit_id,
            tracking_id,
            status,
            timestamp,
            location,
            description,
            created_at,
        } = draft;
        Self {
            id,
            unit_id,
            tracking_id,
            status,
            timestamp,
            location,
            description,
            created_at,
        }
    }
}
