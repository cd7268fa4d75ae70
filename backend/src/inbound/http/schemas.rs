//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; these
//! wrappers mirror them for utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Input is missing or malformed.
    #[schema(rename = "VALIDATION_ERROR")]
    ValidationError,
    /// Status is not a known checkpoint status.
    #[schema(rename = "INVALID_CHECKPOINT_STATUS")]
    InvalidCheckpointStatus,
    /// Unit has not been provisioned.
    #[schema(rename = "UNIT_NOT_FOUND")]
    UnitNotFound,
    /// No unit carries the tracking id.
    #[schema(rename = "TRACKING_NOT_FOUND")]
    TrackingNotFound,
    /// Same event already recorded.
    #[schema(rename = "DUPLICATE_CHECKPOINT")]
    DuplicateCheckpoint,
    /// Backing store unreachable.
    #[schema(rename = "SERVICE_UNAVAILABLE")]
    ServiceUnavailable,
    /// Unexpected failure.
    #[schema(rename = "INTERNAL_SERVER_ERROR")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "UNIT_NOT_FOUND")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "Unit with ID UNIT404 not found")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details.
    details: Option<serde_json::Value>,
}
