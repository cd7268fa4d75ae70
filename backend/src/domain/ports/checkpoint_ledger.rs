//! Port for recording a checkpoint and applying it to its unit in one step.
//!
//! Stores that hold both checkpoints and units implement [`CheckpointLedger`]
//! directly so the duplicate re-check, the append and the unit update happen
//! under one write. [`SequentialCheckpointLedger`] composes any pair of
//! [`CheckpointRepository`] and [`UnitRepository`] adapters instead, running
//! create, re-fetch and update as three separate calls.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Checkpoint, Unit};

use super::{
    CheckpointRepository, CheckpointRepositoryError, UnitRepository, UnitRepositoryError,
    define_port_error,
};

define_port_error! {
    /// Errors raised by checkpoint ledger adapters.
    pub enum CheckpointLedgerError {
        /// Backing store could not be reached.
        Connection { message: String } =>
            "checkpoint ledger connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "checkpoint ledger query failed: {message}",
    }
}

impl From<CheckpointRepositoryError> for CheckpointLedgerError {
    fn from(error: CheckpointRepositoryError) -> Self {
        match error {
            CheckpointRepositoryError::Connection { message } => Self::connection(message),
            CheckpointRepositoryError::Query { message } => Self::query(message),
        }
    }
}

impl From<UnitRepositoryError> for CheckpointLedgerError {
    fn from(error: UnitRepositoryError) -> Self {
        match error {
            UnitRepositoryError::Connection { message } => Self::connection(message),
            UnitRepositoryError::Query { message } => Self::query(message),
        }
    }
}

/// Outcome of [`CheckpointLedger::append`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerAppend {
    /// The checkpoint was stored and applied; carries the updated unit.
    Applied(Unit),
    /// The checkpoint was stored but its unit no longer exists.
    UnitMissing,
    /// A near-identical checkpoint was recorded first; nothing was written.
    Duplicate,
}

/// Records checkpoints and applies them to their units.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckpointLedger: Send + Sync {
    /// Store `checkpoint` and apply it to its unit, stamping the unit's
    /// `last_updated` with `applied_at`.
    async fn append(
        &self,
        checkpoint: Checkpoint,
        applied_at: DateTime<Utc>,
    ) -> Result<LedgerAppend, CheckpointLedgerError>;
}

/// Ledger built from two independent repositories.
///
/// Never reports [`LedgerAppend::Duplicate`]; callers check
/// [`CheckpointRepository::exists`] beforehand.
pub struct SequentialCheckpointLedger<C, U> {
    checkpoints: Arc<C>,
    units: Arc<U>,
}

impl<C, U> SequentialCheckpointLedger<C, U> {
    pub fn new(checkpoints: Arc<C>, units: Arc<U>) -> Self {
        Self { checkpoints, units }
    }
}

#[async_trait]
impl<C, U> CheckpointLedger for SequentialCheckpointLedger<C, U>
where
    C: CheckpointRepository,
    U: UnitRepository,
{
    async fn append(
        &self,
        checkpoint: Checkpoint,
        applied_at: DateTime<Utc>,
    ) -> Result<LedgerAppend, CheckpointLedgerError> {
        let stored = self.checkpoints.create(&checkpoint).await?;

        let Some(mut unit) = self.units.find_by_id(stored.unit_id()).await? else {
            return Ok(LedgerAppend::UnitMissing);
        };

        unit.update_status(stored, applied_at)
            .map_err(|err| CheckpointLedgerError::query(err.to_string()))?;
        let updated = self.units.update(&unit).await?;
        Ok(LedgerAppend::Applied(updated))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::TimeZone;
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{MockCheckpointRepository, MockUnitRepository};
    use crate::domain::{
        CheckpointDraft, CheckpointId, CheckpointStatus, TrackingId, UnitDraft, UnitId,
    };

    #[fixture]
    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 30, 12, 0, 0)
            .single()
            .expect("valid fixture time")
    }

    fn checkpoint(at: DateTime<Utc>) -> Checkpoint {
        Checkpoint::new(CheckpointDraft {
            id: CheckpointId::new("cp-1").expect("checkpoint id"),
            unit_id: UnitId::new("UNIT001").expect("unit id"),
            tracking_id: TrackingId::new("TRK001").expect("tracking id"),
            status: CheckpointStatus::PickedUp,
            timestamp: at,
            location: None,
            description: None,
            created_at: at,
        })
    }

    fn unit(at: DateTime<Utc>) -> Unit {
        Unit::new(UnitDraft {
            id: UnitId::new("UNIT001").expect("unit id"),
            tracking_id: TrackingId::new("TRK001").expect("tracking id"),
            current_status: CheckpointStatus::Created,
            created_at: at,
        })
    }

    #[rstest]
    #[tokio::test]
    async fn applies_the_stored_checkpoint_to_the_refetched_unit(at: DateTime<Utc>) {
        let recorded = checkpoint(at);
        let mut checkpoints = MockCheckpointRepository::new();
        checkpoints
            .expect_create()
            .times(1)
            .returning(|checkpoint| Ok(checkpoint.clone()));
        let mut units = MockUnitRepository::new();
        let current = unit(at);
        units
            .expect_find_by_id()
            .with(eq(UnitId::new("UNIT001").expect("unit id")))
            .times(1)
            .return_once(move |_| Ok(Some(current)));
        units
            .expect_update()
            .times(1)
            .returning(|unit| Ok(unit.clone()));

        let ledger = SequentialCheckpointLedger::new(Arc::new(checkpoints), Arc::new(units));
        let outcome = ledger
            .append(recorded.clone(), at)
            .await
            .expect("append succeeds");

        let LedgerAppend::Applied(updated) = outcome else {
            panic!("expected applied outcome, got {outcome:?}");
        };
        assert_eq!(updated.current_status(), CheckpointStatus::PickedUp);
        assert_eq!(updated.checkpoint_history(), &[recorded]);
    }

    #[rstest]
    #[tokio::test]
    async fn keeps_the_checkpoint_when_the_unit_vanished(at: DateTime<Utc>) {
        let mut checkpoints = MockCheckpointRepository::new();
        checkpoints
            .expect_create()
            .times(1)
            .returning(|checkpoint| Ok(checkpoint.clone()));
        let mut units = MockUnitRepository::new();
        units.expect_find_by_id().times(1).returning(|_| Ok(None));
        units.expect_update().never();

        let ledger = SequentialCheckpointLedger::new(Arc::new(checkpoints), Arc::new(units));
        let outcome = ledger
            .append(checkpoint(at), at)
            .await
            .expect("append succeeds");

        assert_eq!(outcome, LedgerAppend::UnitMissing);
    }

    #[rstest]
    #[tokio::test]
    async fn store_faults_keep_their_category(at: DateTime<Utc>) {
        let mut checkpoints = MockCheckpointRepository::new();
        checkpoints
            .expect_create()
            .returning(|_| Err(CheckpointRepositoryError::connection("down")));
        let ledger = SequentialCheckpointLedger::new(
            Arc::new(checkpoints),
            Arc::new(MockUnitRepository::new()),
        );

        let err = ledger
            .append(checkpoint(at), at)
            .await
            .expect_err("append fails");

        assert_eq!(err, CheckpointLedgerError::connection("down"));
    }
}
