//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input is missing or malformed.
    ValidationError,
    /// A status string is not a known checkpoint status.
    InvalidCheckpointStatus,
    /// The referenced unit does not exist.
    UnitNotFound,
    /// No unit carries the requested tracking id.
    TrackingNotFound,
    /// A near-identical checkpoint was already recorded.
    DuplicateCheckpoint,
    /// A backing store could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the service.
    #[serde(rename = "INTERNAL_SERVER_ERROR")]
    InternalError,
}

/// Domain error payload.
///
/// Construction captures the [`TraceId`] in scope, so errors raised while a
/// request is being served correlate with that request automatically.
///
/// # Examples
/// ```
/// use tracking::domain::{Error, ErrorCode};
///
/// let err = Error::unit_not_found("UNIT404");
/// assert_eq!(err.code(), ErrorCode::UnitNotFound);
/// assert_eq!(err.message(), "Unit with ID UNIT404 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create an error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier of the request that raised the error.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary structured details.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use tracking::domain::Error;
    ///
    /// let err = Error::validation("bad").with_details(json!({ "field": "unitId" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::ValidationError`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidCheckpointStatus`].
    pub fn invalid_checkpoint_status(status: &str) -> Self {
        Self::new(
            ErrorCode::InvalidCheckpointStatus,
            format!("Invalid status: {status}"),
        )
        .with_details(json!({ "status": status }))
    }

    /// Convenience constructor for [`ErrorCode::UnitNotFound`].
    pub fn unit_not_found(unit_id: &str) -> Self {
        Self::new(
            ErrorCode::UnitNotFound,
            format!("Unit with ID {unit_id} not found"),
        )
    }

    /// Convenience constructor for [`ErrorCode::TrackingNotFound`].
    pub fn tracking_not_found(tracking_id: &str) -> Self {
        Self::new(
            ErrorCode::TrackingNotFound,
            format!("No unit found with trackingId: {tracking_id}"),
        )
    }

    /// Convenience constructor for [`ErrorCode::DuplicateCheckpoint`].
    pub fn duplicate_checkpoint() -> Self {
        Self::new(
            ErrorCode::DuplicateCheckpoint,
            "Checkpoint already exists for this unit, status, and timestamp",
        )
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
