//! Tracking domain types.
//!
//! A [`Unit`] is provisioned once and then mutated only by applying
//! [`Checkpoint`] events to it. Checkpoints are immutable and recorded in an
//! append-only ledger; the unit keeps its own copy of every checkpoint applied
//! to it so that status queries can consult history without a join.

use std::fmt;

mod checkpoint;
mod ids;
mod status;
mod tolerance;
mod unit;

pub use checkpoint::{Checkpoint, CheckpointDraft};
pub use ids::{CheckpointId, TrackingId, UnitId};
pub use status::{CheckpointStatus, ParseCheckpointStatusError};
pub use tolerance::{DEFAULT_DUPLICATE_TOLERANCE_MS, DuplicateTolerance};
pub use unit::{Unit, UnitDraft};

/// Validation errors raised by tracking constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingValidationError {
    /// Unit id was blank.
    EmptyUnitId,
    /// Tracking id was blank.
    EmptyTrackingId,
    /// Checkpoint id was blank.
    EmptyCheckpointId,
    /// Duplicate window was zero or too large to represent.
    InvalidTolerance {
        millis: u64,
    },
    /// Checkpoint belongs to a different unit than the one it was applied to.
    ForeignCheckpoint {
        unit_id: String,
        checkpoint_unit_id: String,
    },
}

impl fmt::Display for TrackingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUnitId => write!(f, "unit id must not be empty"),
            Self::EmptyTrackingId => write!(f, "tracking id must not be empty"),
            Self::EmptyCheckpointId => write!(f, "checkpoint id must not be empty"),
            Self::InvalidTolerance { millis } => write!(
                f,
                "duplicate tolerance must be a positive number of milliseconds (got {millis})"
            ),
            Self::ForeignCheckpoint {
                unit_id,
                checkpoint_unit_id,
            } => write!(
                f,
                "checkpoint for unit {checkpoint_unit_id} cannot be applied to unit {unit_id}"
            ),
        }
    }
}

impl std::error::Error for TrackingValidationError {}
