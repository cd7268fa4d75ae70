//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: model units and their checkpoint ledger independently of any
//! transport or storage engine. Entities keep their fields private and expose
//! getters; mutation of a [`Unit`] goes through [`Unit::update_status`] only.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: task-local request correlation identifier.
//! - Tracking types: [`Unit`], [`Checkpoint`], [`CheckpointStatus`], the id
//!   newtypes and [`DuplicateTolerance`].
//! - Services: [`CheckpointCommandService`] and [`TrackingQueryService`].

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod tracking;
mod tracking_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::tracking::{
    Checkpoint, CheckpointDraft, CheckpointId, CheckpointStatus, DEFAULT_DUPLICATE_TOLERANCE_MS,
    DuplicateTolerance, ParseCheckpointStatusError, TrackingId, TrackingValidationError, Unit,
    UnitDraft, UnitId,
};
pub use self::tracking_service::{CheckpointCommandService, TrackingQueryService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use tracking::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::tracking_not_found("TRK404"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
