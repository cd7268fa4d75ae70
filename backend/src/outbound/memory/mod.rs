//! Volatile in-process tracking store.
//!
//! [`InMemoryTrackingStore`] keeps the checkpoint ledger and the unit table
//! behind one `RwLock`, which lets it implement [`CheckpointLedger`] with the
//! duplicate re-check, the append and the unit update under a single write
//! guard. Nothing survives a restart.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::{
    CheckpointLedger, CheckpointLedgerError, CheckpointRepository, CheckpointRepositoryError,
    LedgerAppend, UnitRepository, UnitRepositoryError,
};
use crate::domain::{
    Checkpoint, CheckpointStatus, DuplicateTolerance, TrackingId, TrackingValidationError, Unit,
    UnitDraft, UnitId,
};

/// Units provisioned by [`InMemoryTrackingStore::with_reference_units`].
const REFERENCE_UNITS: [(&str, &str, CheckpointStatus); 3] = [
    ("UNIT001", "TRK001", CheckpointStatus::Created),
    ("UNIT002", "TRK002", CheckpointStatus::InTransit),
    ("UNIT003", "TRK003", CheckpointStatus::Delivered),
];

const POISONED: &str = "tracking store lock poisoned";

/// Marker for a poisoned store lock.
#[derive(Debug, Clone, Copy)]
struct StorePoisoned;

impl<T> From<PoisonError<T>> for StorePoisoned {
    fn from(_: PoisonError<T>) -> Self {
        Self
    }
}

impl From<StorePoisoned> for CheckpointRepositoryError {
    fn from(_: StorePoisoned) -> Self {
        Self::query(POISONED)
    }
}

impl From<StorePoisoned> for UnitRepositoryError {
    fn from(_: StorePoisoned) -> Self {
        Self::query(POISONED)
    }
}

impl From<StorePoisoned> for CheckpointLedgerError {
    fn from(_: StorePoisoned) -> Self {
        Self::query(POISONED)
    }
}

#[derive(Debug, Default)]
struct TrackingTables {
    /// Append-only, in insertion order.
    checkpoints: Vec<Checkpoint>,
    units: BTreeMap<UnitId, Unit>,
}

impl TrackingTables {
    fn has_near_duplicate(
        &self,
        unit_id: &UnitId,
        status: CheckpointStatus,
        timestamp: DateTime<Utc>,
        tolerance: DuplicateTolerance,
    ) -> bool {
        self.checkpoints
            .iter()
            .any(|checkpoint| checkpoint.is_near_duplicate_of(unit_id, status, timestamp, tolerance))
    }
}

/// In-memory implementation of the checkpoint, unit and ledger ports.
///
/// Units are listed in identifier order.
///
/// # Examples
/// ```
/// use mockable::DefaultClock;
/// use tracking::domain::DuplicateTolerance;
/// use tracking::outbound::memory::InMemoryTrackingStore;
///
/// let store = InMemoryTrackingStore::with_reference_units(&DefaultClock, DuplicateTolerance::default());
/// assert_eq!(store.unit_count().expect("store readable"), 3);
/// ```
#[derive(Debug)]
pub struct InMemoryTrackingStore {
    tables: RwLock<TrackingTables>,
    tolerance: DuplicateTolerance,
}

impl Default for InMemoryTrackingStore {
    fn default() -> Self {
        Self::new(DuplicateTolerance::default())
    }
}

impl InMemoryTrackingStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(tolerance: DuplicateTolerance) -> Self {
        Self {
            tables: RwLock::new(TrackingTables::default()),
            tolerance,
        }
    }

    /// Create a store holding the reference units `UNIT001`..`UNIT003`, each
    /// with an empty history and created at the clock's current time.
    #[must_use]
    pub fn with_reference_units(clock: &dyn Clock, tolerance: DuplicateTolerance) -> Self {
        let now = clock.utc();
        let units = REFERENCE_UNITS
            .into_iter()
            .filter_map(|(id, tracking_id, status)| {
                reference_unit(id, tracking_id, status, now).ok()
            })
            .map(|unit| (unit.id().clone(), unit))
            .collect();
        Self {
            tables: RwLock::new(TrackingTables {
                checkpoints: Vec::new(),
                units,
            }),
            tolerance,
        }
    }

    /// Duplicate window applied by [`CheckpointRepository::exists`].
    #[must_use]
    pub fn tolerance(&self) -> DuplicateTolerance {
        self.tolerance
    }

    /// Provision a unit, replacing any unit with the same id.
    ///
    /// # Errors
    ///
    /// Fails only when the store lock is poisoned.
    pub fn provision(&self, unit: Unit) -> Result<(), UnitRepositoryError> {
        self.write()?.units.insert(unit.id().clone(), unit);
        Ok(())
    }

    /// Number of stored units.
    ///
    /// # Errors
    ///
    /// Fails only when the store lock is poisoned.
    pub fn unit_count(&self) -> Result<usize, UnitRepositoryError> {
        Ok(self.read()?.units.len())
    }

    /// Number of stored checkpoints.
    ///
    /// # Errors
    ///
    /// Fails only when the store lock is poisoned.
    pub fn checkpoint_count(&self) -> Result<usize, CheckpointRepositoryError> {
        Ok(self.read()?.checkpoints.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TrackingTables>, StorePoisoned> {
        Ok(self.tables.read()?)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TrackingTables>, StorePoisoned> {
        Ok(self.tables.write()?)
    }
}

fn reference_unit(
    id: &str,
    tracking_id: &str,
    status: CheckpointStatus,
    now: DateTime<Utc>,
) -> Result<Unit, TrackingValidationError> {
    Ok(Unit::new(UnitDraft {
        id: UnitId::new(id)?,
        tracking_id: TrackingId::new(tracking_id)?,
        current_status: status,
        created_at: now,
    }))
}

#[async_trait]
impl CheckpointRepository for InMemoryTrackingStore {
    async fn create(
        &self,
        checkpoint: &Checkpoint,
    ) -> Result<Checkpoint, CheckpointRepositoryError> {
        self.write()?.checkpoints.push(checkpoint.clone());
        Ok(checkpoint.clone())
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Vec<Checkpoint>, CheckpointRepositoryError> {
        let tables = self.read()?;
        Ok(tables
            .checkpoints
            .iter()
            .filter(|checkpoint| checkpoint.tracking_id() == tracking_id)
            .cloned()
            .collect())
    }

    async fn find_by_unit_id(
        &self,
        unit_id: &UnitId,
    ) -> Result<Vec<Checkpoint>, CheckpointRepositoryError> {
        let tables = self.read()?;
        Ok(tables
            .checkpoints
            .iter()
            .filter(|checkpoint| checkpoint.unit_id() == unit_id)
            .cloned()
            .collect())
    }

    async fn exists(
        &self,
        unit_id: &UnitId,
        status: CheckpointStatus,
        timestamp: DateTime<Utc>,
    ) -> Result<bool, CheckpointRepositoryError> {
        Ok(self
            .read()?
            .has_near_duplicate(unit_id, status, timestamp, self.tolerance))
    }
}

#[async_trait]
impl UnitRepository for InMemoryTrackingStore {
    async fn find_by_id(&self, id: &UnitId) -> Result<Option<Unit>, UnitRepositoryError> {
        Ok(self.read()?.units.get(id).cloned())
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Option<Unit>, UnitRepositoryError> {
        let tables = self.read()?;
        Ok(tables
            .units
            .values()
            .find(|unit| unit.tracking_id() == tracking_id)
            .cloned())
    }

    async fn find_by_status(
        &self,
        status: Option<CheckpointStatus>,
    ) -> Result<Vec<Unit>, UnitRepositoryError> {
        let tables = self.read()?;
        Ok(tables
            .units
            .values()
            .filter(|unit| status.is_none_or(|status| unit.has_reached(status)))
            .cloned()
            .collect())
    }

    async fn update(&self, unit: &Unit) -> Result<Unit, UnitRepositoryError> {
        self.write()?.units.insert(unit.id().clone(), unit.clone());
        Ok(unit.clone())
    }

    async fn exists(&self, id: &UnitId) -> Result<bool, UnitRepositoryError> {
        Ok(self.read()?.units.contains_key(id))
    }
}

#[async_trait]
impl CheckpointLedger for InMemoryTrackingStore {
    async fn append(
        &self,
        checkpoint: Checkpoint,
        applied_at: DateTime<Utc>,
    ) -> Result<LedgerAppend, CheckpointLedgerError> {
        let mut tables = self.write()?;
        if tables.has_near_duplicate(
            checkpoint.unit_id(),
            checkpoint.status(),
            checkpoint.timestamp(),
            self.tolerance,
        ) {
            return Ok(LedgerAppend::Duplicate);
        }

        let applied = match tables.units.get_mut(checkpoint.unit_id()) {
            Some(unit) => {
                unit.update_status(checkpoint.clone(), applied_at)
                    .map_err(|err| CheckpointLedgerError::query(err.to_string()))?;
                Some(unit.clone())
            }
            None => None,
        };
        tables.checkpoints.push(checkpoint);
        Ok(applied.map_or(LedgerAppend::UnitMissing, LedgerAppend::Applied))
    }
}
