//! Tracking domain services.
//!
//! [`CheckpointCommandService`] registers checkpoints; [`TrackingQueryService`]
//! answers history and status queries. Both validate raw input at the
//! boundary so that every inbound adapter reports identical errors.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CheckpointCommand, CheckpointIdGenerator, CheckpointLedger, CheckpointLedgerError,
    CheckpointPayload, CheckpointRepository, CheckpointRepositoryError, GetTrackingHistoryRequest,
    LedgerAppend, ListUnitsByStatusRequest, ListUnitsByStatusResponse, RegisterCheckpointRequest,
    TrackingHistoryResponse, TrackingQuery, UnitPayload, UnitRepository, UnitRepositoryError,
};
use crate::domain::{
    Checkpoint, CheckpointDraft, CheckpointStatus, Error, TrackingId, TrackingValidationError,
    UnitId,
};

const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: unitId, trackingId, and status are required";

fn map_checkpoint_repository_error(error: CheckpointRepositoryError) -> Error {
    match error {
        CheckpointRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("checkpoint repository unavailable: {message}"))
        }
        CheckpointRepositoryError::Query { message } => {
            Error::internal(format!("checkpoint repository error: {message}"))
        }
    }
}

fn map_unit_repository_error(error: UnitRepositoryError) -> Error {
    match error {
        UnitRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("unit repository unavailable: {message}"))
        }
        UnitRepositoryError::Query { message } => {
            Error::internal(format!("unit repository error: {message}"))
        }
    }
}

fn map_ledger_error(error: CheckpointLedgerError) -> Error {
    match error {
        CheckpointLedgerError::Connection { message } => {
            Error::service_unavailable(format!("checkpoint ledger unavailable: {message}"))
        }
        CheckpointLedgerError::Query { message } => {
            Error::internal(format!("checkpoint ledger error: {message}"))
        }
    }
}

fn parse_status(raw: &str) -> Result<CheckpointStatus, Error> {
    raw.parse()
        .map_err(|_| Error::invalid_checkpoint_status(raw))
}

/// Parsed form of a [`RegisterCheckpointRequest`].
struct ValidatedRegistration {
    unit_id: UnitId,
    tracking_id: TrackingId,
    status: CheckpointStatus,
}

fn validate_registration(
    request: &RegisterCheckpointRequest,
) -> Result<ValidatedRegistration, Error> {
    let missing: Vec<&str> = [
        ("unitId", request.unit_id.as_str()),
        ("trackingId", request.tracking_id.as_str()),
        ("status", request.status.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();
    if !missing.is_empty() {
        return Err(
            Error::validation(MISSING_FIELDS_MESSAGE).with_details(json!({ "missing": missing }))
        );
    }

    let status = parse_status(&request.status)?;
    // A blank identifier can never name a provisioned unit.
    let unit_id =
        UnitId::new(&request.unit_id).map_err(|_| Error::unit_not_found(&request.unit_id))?;
    let tracking_id = TrackingId::new(&request.tracking_id)
        .map_err(|err: TrackingValidationError| Error::validation(err.to_string()))?;
    Ok(ValidatedRegistration {
        unit_id,
        tracking_id,
        status,
    })
}

/// Service implementing [`CheckpointCommand`].
#[derive(Clone)]
pub struct CheckpointCommandService<C, U, L> {
    checkpoints: Arc<C>,
    units: Arc<U>,
    ledger: Arc<L>,
    ids: Arc<dyn CheckpointIdGenerator>,
    clock: Arc<dyn Clock>,
}

impl<C, U, L> CheckpointCommandService<C, U, L> {
    /// Create a command service over the given stores.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use tracking::domain::CheckpointCommandService;
    /// # use tracking::domain::ports::UuidCheckpointIdGenerator;
    /// # use tracking::outbound::memory::InMemoryTrackingStore;
    /// let store = Arc::new(InMemoryTrackingStore::with_reference_units(
    ///     &DefaultClock,
    ///     Default::default(),
    /// ));
    /// let service = CheckpointCommandService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    ///     Arc::new(UuidCheckpointIdGenerator),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(
        checkpoints: Arc<C>,
        units: Arc<U>,
        ledger: Arc<L>,
        ids: Arc<dyn CheckpointIdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            checkpoints,
            units,
            ledger,
            ids,
            clock,
        }
    }
}

impl<C, U, L> CheckpointCommandService<C, U, L>
where
    C: CheckpointRepository,
    U: UnitRepository,
    L: CheckpointLedger,
{
    async fn ensure_unit_exists(&self, unit_id: &UnitId) -> Result<(), Error> {
        let exists = self
            .units
            .exists(unit_id)
            .await
            .map_err(map_unit_repository_error)?;
        if exists {
            Ok(())
        } else {
            Err(Error::unit_not_found(unit_id.as_str()))
        }
    }

    async fn ensure_not_duplicate(
        &self,
        unit_id: &UnitId,
        status: CheckpointStatus,
        timestamp: DateTime<Utc>,
    ) -> Result<(), Error> {
        let exists = self
            .checkpoints
            .exists(unit_id, status, timestamp)
            .await
            .map_err(map_checkpoint_repository_error)?;
        if exists {
            debug!(unit_id = %unit_id, %status, %timestamp, "duplicate checkpoint rejected");
            return Err(Error::duplicate_checkpoint());
        }
        Ok(())
    }
}

#[async_trait]
impl<C, U, L> CheckpointCommand for CheckpointCommandService<C, U, L>
where
    C: CheckpointRepository,
    U: UnitRepository,
    L: CheckpointLedger,
{
    async fn register(
        &self,
        request: RegisterCheckpointRequest,
    ) -> Result<CheckpointPayload, Error> {
        let ValidatedRegistration {
            unit_id,
            tracking_id,
            status,
        } = validate_registration(&request)?;
        self.ensure_unit_exists(&unit_id).await?;

        let now = self.clock.utc();
        let timestamp = request.timestamp.unwrap_or(now);
        self.ensure_not_duplicate(&unit_id, status, timestamp)
            .await?;

        let checkpoint = Checkpoint::new(CheckpointDraft {
            id: self.ids.next_id(),
            unit_id,
            tracking_id,
            status,
            timestamp,
            location: request.location,
            description: request.description,
            created_at: now,
        });
        let payload = CheckpointPayload::from(&checkpoint);

        match self
            .ledger
            .append(checkpoint, now)
            .await
            .map_err(map_ledger_error)?
        {
            LedgerAppend::Applied(unit) => {
                info!(
                    checkpoint_id = %payload.id,
                    unit_id = %unit.id(),
                    status = %unit.current_status(),
                    "checkpoint registered"
                );
            }
            LedgerAppend::UnitMissing => {
                warn!(
                    checkpoint_id = %payload.id,
                    unit_id = %payload.unit_id,
                    "checkpoint stored but its unit no longer exists"
                );
            }
            LedgerAppend::Duplicate => {
                debug!(unit_id = %payload.unit_id, %status, "duplicate checkpoint rejected");
                return Err(Error::duplicate_checkpoint());
            }
        }

        Ok(payload)
    }
}

/// Service implementing [`TrackingQuery`].
#[derive(Clone)]
pub struct TrackingQueryService<C, U> {
    checkpoints: Arc<C>,
    units: Arc<U>,
}

impl<C, U> TrackingQueryService<C, U> {
    pub fn new(checkpoints: Arc<C>, units: Arc<U>) -> Self {
        Self { checkpoints, units }
    }
}

#[async_trait]
impl<C, U> TrackingQuery for TrackingQueryService<C, U>
where
    C: CheckpointRepository,
    U: UnitRepository,
{
    async fn tracking_history(
        &self,
        request: GetTrackingHistoryRequest,
    ) -> Result<TrackingHistoryResponse, Error> {
        let tracking_id = TrackingId::new(&request.tracking_id)
            .map_err(|_| Error::validation("TrackingId is required"))?;

        let unit = self
            .units
            .find_by_tracking_id(&tracking_id)
            .await
            .map_err(map_unit_repository_error)?
            .ok_or_else(|| Error::tracking_not_found(tracking_id.as_str()))?;

        let mut checkpoints = self
            .checkpoints
            .find_by_tracking_id(&tracking_id)
            .await
            .map_err(map_checkpoint_repository_error)?;
        // Stable sort: equal timestamps keep their recorded order.
        checkpoints.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

        Ok(TrackingHistoryResponse {
            unit_id: unit.id().clone(),
            tracking_id: unit.tracking_id().clone(),
            current_status: unit.current_status(),
            checkpoints: checkpoints.into_iter().map(CheckpointPayload::from).collect(),
        })
    }

    async fn units_by_status(
        &self,
        request: ListUnitsByStatusRequest,
    ) -> Result<ListUnitsByStatusResponse, Error> {
        let status = match request.status.as_deref() {
            None | Some("") => CheckpointStatus::default(),
            Some(raw) => parse_status(raw)?,
        };

        let units = self
            .units
            .find_by_status(Some(status))
            .await
            .map_err(map_unit_repository_error)?;

        Ok(ListUnitsByStatusResponse {
            units: units.iter().map(UnitPayload::from).collect(),
        })
    }
}

#[cfg(test)]
#[path = "tracking_service_tests.rs"]
mod tests;
