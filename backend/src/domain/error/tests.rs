//! Tests for the domain error payload.

use rstest::rstest;
use serde_json::{Value, json};

use super::*;

#[rstest]
#[case(ErrorCode::ValidationError, "VALIDATION_ERROR")]
#[case(ErrorCode::InvalidCheckpointStatus, "INVALID_CHECKPOINT_STATUS")]
#[case(ErrorCode::UnitNotFound, "UNIT_NOT_FOUND")]
#[case(ErrorCode::TrackingNotFound, "TRACKING_NOT_FOUND")]
#[case(ErrorCode::DuplicateCheckpoint, "DUPLICATE_CHECKPOINT")]
#[case(ErrorCode::ServiceUnavailable, "SERVICE_UNAVAILABLE")]
#[case(ErrorCode::InternalError, "INTERNAL_SERVER_ERROR")]
fn codes_serialise_to_stable_wire_names(#[case] code: ErrorCode, #[case] expected: &str) {
    let value = serde_json::to_value(code).expect("serialise code");
    assert_eq!(value, Value::String(expected.to_owned()));
}

#[rstest]
fn invalid_status_error_names_the_rejected_value() {
    let err = Error::invalid_checkpoint_status("TELEPORTED");

    assert_eq!(err.code(), ErrorCode::InvalidCheckpointStatus);
    assert_eq!(err.message(), "Invalid status: TELEPORTED");
    assert_eq!(err.details(), Some(&json!({ "status": "TELEPORTED" })));
}

#[rstest]
fn tracking_not_found_mentions_tracking_id() {
    let err = Error::tracking_not_found("UNKNOWN_TRK");
    assert_eq!(err.code(), ErrorCode::TrackingNotFound);
    assert!(err.message().contains("UNKNOWN_TRK"));
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
        .parse()
        .expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::duplicate_checkpoint() }).await;
    assert_eq!(error.trace_id(), Some("00000000-0000-0000-0000-000000000000"));
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let err = Error::validation("TrackingId is required");
    let value = serde_json::to_value(&err).expect("serialise error");

    assert_eq!(
        value,
        json!({ "code": "VALIDATION_ERROR", "message": "TrackingId is required" })
    );
}

#[rstest]
fn deserialises_trace_id_and_details() {
    let value = json!({
        "code": "DUPLICATE_CHECKPOINT",
        "message": "dup",
        "traceId": "abc",
        "details": { "unitId": "UNIT001" }
    });
    let err: Error = serde_json::from_value(value).expect("deserialise error");

    assert_eq!(err.code(), ErrorCode::DuplicateCheckpoint);
    assert_eq!(err.trace_id(), Some("abc"));
    assert_eq!(err.details(), Some(&json!({ "unitId": "UNIT001" })));
}
