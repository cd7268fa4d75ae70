//! Unit aggregate.

use chrono::{DateTime, Utc};

use super::{Checkpoint, CheckpointStatus, TrackingId, TrackingValidationError, UnitId};

/// Input payload for [`Unit::new`].
#[derive(Debug, Clone)]
pub struct UnitDraft {
    pub id: UnitId,
    pub tracking_id: TrackingId,
    pub current_status: CheckpointStatus,
    pub created_at: DateTime<Utc>,
}

/// A tracked logistics unit and its checkpoint history.
///
/// `current_status` always equals the status of the most recently applied
/// checkpoint. Application order wins over checkpoint timestamps, so a late
/// back-dated checkpoint still becomes the current status. The status the
/// unit was provisioned with stays part of its past.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub(super) id: UnitId,
    pub(super) tracking_id: TrackingId,
    pub(super) current_status: CheckpointStatus,
    pub(super) provisioned_status: CheckpointStatus,
    pub(super) checkpoint_history: Vec<Checkpoint>,
    pub(super) created_at: DateTime<Utc>,
    pub(super) last_updated: DateTime<Utc>,
}

impl Unit {
    /// Provision a unit with an empty history.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use tracking::domain::{CheckpointStatus, TrackingId, Unit, UnitDraft, UnitId};
    ///
    /// let now = Utc::now();
    /// let unit = Unit::new(UnitDraft {
    ///     id: UnitId::new("UNIT001").expect("unit"),
    ///     tracking_id: TrackingId::new("TRK001").expect("tracking"),
    ///     current_status: CheckpointStatus::Created,
    ///     created_at: now,
    /// });
    /// assert!(unit.checkpoint_history().is_empty());
    /// assert_eq!(unit.last_updated(), now);
    /// ```
    pub fn new(draft: UnitDraft) -> Self {
        let UnitDraft {
            id,
            tracking_id,
            current_status,
            created_at,
        } = draft;
        Self {
            id,
            tracking_id,
            current_status,
            provisioned_status: current_status,
            checkpoint_history: Vec::new(),
            created_at,
            last_updated: created_at,
        }
    }

    /// Unit identifier.
    pub fn id(&self) -> &UnitId {
        &self.id
    }

    /// Tracking number the unit is published under.
    pub fn tracking_id(&self) -> &TrackingId {
        &self.tracking_id
    }

    /// Status of the most recently applied checkpoint.
    pub fn current_status(&self) -> CheckpointStatus {
        self.current_status
    }

    /// Status the unit held when it was provisioned.
    pub fn provisioned_status(&self) -> CheckpointStatus {
        self.provisioned_status
    }

    /// Applied checkpoints in application order.
    pub fn checkpoint_history(&self) -> &[Checkpoint] {
        self.checkpoint_history.as_slice()
    }

    /// Time the unit was provisioned.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time the last checkpoint was applied.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Whether the unit is, or at some point was, in `status`.
    pub fn has_reached(&self, status: CheckpointStatus) -> bool {
        self.current_status == status
            || self.provisioned_status == status
            || self
                .checkpoint_history
                .iter()
                .any(|checkpoint| checkpoint.status() == status)
    }

    /// Apply a checkpoint: append it to the history, adopt its status and
    /// refresh `last_updated` to `applied_at`.
    ///
    /// Checkpoints recorded against another unit are rejected and leave the
    /// unit untouched.
    pub fn update_status(
        &mut self,
        checkpoint: Checkpoint,
        applied_at: DateTime<Utc>,
    ) -> Result<(), TrackingValidationError> {
        if checkpoint.unit_id() != &self.id {
            return Err(TrackingValidationError::ForeignCheckpoint {
                unit_id: self.id.to_string(),
                checkpoint_unit_id: checkpoint.unit_id().to_string(),
            });
        }
        self.current_status = checkpoint.status();
        self.checkpoint_history.push(checkpoint);
        self.last_updated = applied_at;
        Ok(())
    }
}
