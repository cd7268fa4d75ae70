//! Tests for the tracking services.

use std::sync::Arc;

use chrono::{TimeDelta, TimeZone};
use mockall::predicate::{always, eq};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockCheckpointIdGenerator, MockCheckpointLedger, MockCheckpointRepository, MockUnitRepository,
};
use crate::domain::{CheckpointId, ErrorCode, Unit, UnitDraft};
use crate::test_support::FixedClock;

type CommandService =
    CheckpointCommandService<MockCheckpointRepository, MockUnitRepository, MockCheckpointLedger>;
type QueryService = TrackingQueryService<MockCheckpointRepository, MockUnitRepository>;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 30, 12, 0, 0)
        .single()
        .expect("valid fixture time")
}

fn unit_id() -> UnitId {
    UnitId::new("UNIT001").expect("unit id")
}

fn tracking_id() -> TrackingId {
    TrackingId::new("TRK001").expect("tracking id")
}

fn request(status: &str) -> RegisterCheckpointRequest {
    RegisterCheckpointRequest {
        unit_id: "UNIT001".to_owned(),
        tracking_id: "TRK001".to_owned(),
        status: status.to_owned(),
        timestamp: None,
        location: Some("Rotterdam hub".to_owned()),
        description: Some("Departed".to_owned()),
    }
}

fn seeded_unit(now: DateTime<Utc>) -> Unit {
    Unit::new(UnitDraft {
        id: unit_id(),
        tracking_id: tracking_id(),
        current_status: CheckpointStatus::Created,
        created_at: now,
    })
}

fn checkpoint(id: &str, status: CheckpointStatus, timestamp: DateTime<Utc>) -> Checkpoint {
    Checkpoint::new(CheckpointDraft {
        id: CheckpointId::new(id).expect("checkpoint id"),
        unit_id: unit_id(),
        tracking_id: tracking_id(),
        status,
        timestamp,
        location: None,
        description: None,
        created_at: timestamp,
    })
}

fn fixed_ids() -> MockCheckpointIdGenerator {
    let mut ids = MockCheckpointIdGenerator::new();
    ids.expect_next_id()
        .returning(|| CheckpointId::new("cp-fixed").expect("checkpoint id"));
    ids
}

fn command_service(
    checkpoints: MockCheckpointRepository,
    units: MockUnitRepository,
    ledger: MockCheckpointLedger,
    now: DateTime<Utc>,
) -> CommandService {
    CheckpointCommandService::new(
        Arc::new(checkpoints),
        Arc::new(units),
        Arc::new(ledger),
        Arc::new(fixed_ids()),
        Arc::new(FixedClock::new(now)),
    )
}

fn known_unit() -> MockUnitRepository {
    let mut units = MockUnitRepository::new();
    units
        .expect_exists()
        .with(eq(unit_id()))
        .returning(|_| Ok(true));
    units
}

fn no_duplicates() -> MockCheckpointRepository {
    let mut checkpoints = MockCheckpointRepository::new();
    checkpoints.expect_exists().returning(|_, _, _| Ok(false));
    checkpoints
}

fn applying_ledger(now: DateTime<Utc>) -> MockCheckpointLedger {
    let mut ledger = MockCheckpointLedger::new();
    ledger
        .expect_append()
        .with(always(), eq(now))
        .times(1)
        .returning(move |checkpoint, applied_at| {
            let mut unit = seeded_unit(now);
            unit.update_status(checkpoint, applied_at)
                .expect("checkpoint belongs to unit");
            Ok(LedgerAppend::Applied(unit))
        });
    ledger
}

#[rstest]
#[tokio::test]
async fn register_returns_the_recorded_checkpoint(now: DateTime<Utc>) {
    let service = command_service(no_duplicates(), known_unit(), applying_ledger(now), now);

    let payload = service
        .register(request("IN_TRANSIT"))
        .await
        .expect("registration succeeds");

    assert_eq!(payload.id.as_str(), "cp-fixed");
    assert_eq!(payload.unit_id, unit_id());
    assert_eq!(payload.tracking_id, tracking_id());
    assert_eq!(payload.status, CheckpointStatus::InTransit);
    assert_eq!(payload.timestamp, now);
    assert_eq!(payload.created_at, now);
    assert_eq!(payload.location.as_deref(), Some("Rotterdam hub"));
    assert_eq!(payload.description.as_deref(), Some("Departed"));
}

#[rstest]
#[tokio::test]
async fn register_keeps_a_supplied_timestamp(now: DateTime<Utc>) {
    let event_time = now - TimeDelta::hours(3);
    let mut checkpoints = MockCheckpointRepository::new();
    checkpoints
        .expect_exists()
        .with(eq(unit_id()), eq(CheckpointStatus::PickedUp), eq(event_time))
        .times(1)
        .returning(|_, _, _| Ok(false));
    let service = command_service(checkpoints, known_unit(), applying_ledger(now), now);

    let mut input = request("PICKED_UP");
    input.timestamp = Some(event_time);
    let payload = service.register(input).await.expect("registration succeeds");

    assert_eq!(payload.timestamp, event_time);
    assert_eq!(payload.created_at, now);
}

#[rstest]
#[case("", "TRK001", "CREATED", "unitId")]
#[case("UNIT001", "", "CREATED", "trackingId")]
#[case("UNIT001", "TRK001", "", "status")]
#[tokio::test]
async fn register_rejects_missing_fields(
    now: DateTime<Utc>,
    #[case] unit: &str,
    #[case] tracking: &str,
    #[case] status: &str,
    #[case] missing_field: &str,
) {
    let mut units = MockUnitRepository::new();
    units.expect_exists().never();
    let mut ledger = MockCheckpointLedger::new();
    ledger.expect_append().never();
    let service = command_service(MockCheckpointRepository::new(), units, ledger, now);

    let err = service
        .register(RegisterCheckpointRequest {
            unit_id: unit.to_owned(),
            tracking_id: tracking.to_owned(),
            status: status.to_owned(),
            ..RegisterCheckpointRequest::default()
        })
        .await
        .expect_err("missing field rejected");

    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert_eq!(err.message(), MISSING_FIELDS_MESSAGE);
    assert_eq!(
        err.details(),
        Some(&json!({ "missing": [missing_field] }))
    );
}

#[rstest]
#[case("  ")]
#[case(" IN_TRANSIT ")]
#[tokio::test]
async fn register_treats_padded_statuses_as_invalid(now: DateTime<Utc>, #[case] status: &str) {
    let mut units = MockUnitRepository::new();
    units.expect_exists().never();
    let service = command_service(
        MockCheckpointRepository::new(),
        units,
        MockCheckpointLedger::new(),
        now,
    );

    let err = service
        .register(request(status))
        .await
        .expect_err("padded status rejected");

    assert_eq!(err.code(), ErrorCode::InvalidCheckpointStatus);
    assert_eq!(err.message(), format!("Invalid status: {status}"));
}

#[rstest]
#[tokio::test]
async fn register_reports_blank_unit_ids_as_unknown(now: DateTime<Utc>) {
    let mut units = MockUnitRepository::new();
    units.expect_exists().never();
    let mut ledger = MockCheckpointLedger::new();
    ledger.expect_append().never();
    let service = command_service(MockCheckpointRepository::new(), units, ledger, now);

    let mut input = request("IN_TRANSIT");
    input.unit_id = "  ".to_owned();
    let err = service.register(input).await.expect_err("blank unit id");

    assert_eq!(err.code(), ErrorCode::UnitNotFound);
}

#[rstest]
#[tokio::test]
async fn register_rejects_blank_tracking_ids(now: DateTime<Utc>) {
    let mut units = MockUnitRepository::new();
    units.expect_exists().never();
    let service = command_service(
        MockCheckpointRepository::new(),
        units,
        MockCheckpointLedger::new(),
        now,
    );

    let mut input = request("IN_TRANSIT");
    input.tracking_id = "  ".to_owned();
    let err = service.register(input).await.expect_err("blank tracking id");

    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert_ne!(err.message(), MISSING_FIELDS_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn register_rejects_unknown_status_before_touching_stores(now: DateTime<Utc>) {
    let mut units = MockUnitRepository::new();
    units.expect_exists().never();
    let service = command_service(
        MockCheckpointRepository::new(),
        units,
        MockCheckpointLedger::new(),
        now,
    );

    let err = service
        .register(request("TELEPORTED"))
        .await
        .expect_err("unknown status rejected");

    assert_eq!(err.code(), ErrorCode::InvalidCheckpointStatus);
    assert_eq!(err.message(), "Invalid status: TELEPORTED");
}

#[rstest]
#[tokio::test]
async fn register_rejects_unknown_units(now: DateTime<Utc>) {
    let mut units = MockUnitRepository::new();
    units.expect_exists().returning(|_| Ok(false));
    let mut checkpoints = MockCheckpointRepository::new();
    checkpoints.expect_exists().never();
    let service = command_service(checkpoints, units, MockCheckpointLedger::new(), now);

    let mut input = request("CREATED");
    input.unit_id = "DOES_NOT_EXIST".to_owned();
    let err = service.register(input).await.expect_err("unknown unit");

    assert_eq!(err.code(), ErrorCode::UnitNotFound);
    assert_eq!(err.message(), "Unit with ID DOES_NOT_EXIST not found");
}

#[rstest]
#[tokio::test]
async fn register_rejects_duplicates_without_appending(now: DateTime<Utc>) {
    let mut checkpoints = MockCheckpointRepository::new();
    checkpoints.expect_exists().returning(|_, _, _| Ok(true));
    let mut ledger = MockCheckpointLedger::new();
    ledger.expect_append().never();
    let service = command_service(checkpoints, known_unit(), ledger, now);

    let err = service
        .register(request("IN_TRANSIT"))
        .await
        .expect_err("duplicate rejected");

    assert_eq!(err.code(), ErrorCode::DuplicateCheckpoint);
}

#[rstest]
#[tokio::test]
async fn register_reports_duplicates_detected_by_the_ledger(now: DateTime<Utc>) {
    let mut ledger = MockCheckpointLedger::new();
    ledger
        .expect_append()
        .returning(|_, _| Ok(LedgerAppend::Duplicate));
    let service = command_service(no_duplicates(), known_unit(), ledger, now);

    let err = service
        .register(request("IN_TRANSIT"))
        .await
        .expect_err("racing duplicate rejected");

    assert_eq!(err.code(), ErrorCode::DuplicateCheckpoint);
}

#[rstest]
#[tokio::test]
async fn register_succeeds_when_the_unit_vanished(now: DateTime<Utc>) {
    let mut ledger = MockCheckpointLedger::new();
    ledger
        .expect_append()
        .returning(|_, _| Ok(LedgerAppend::UnitMissing));
    let service = command_service(no_duplicates(), known_unit(), ledger, now);

    let payload = service
        .register(request("DELIVERED"))
        .await
        .expect("checkpoint kept");

    assert_eq!(payload.status, CheckpointStatus::Delivered);
}

#[rstest]
#[case(UnitRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UnitRepositoryError::query("poisoned"), ErrorCode::InternalError)]
#[tokio::test]
async fn register_maps_unit_store_faults(
    now: DateTime<Utc>,
    #[case] fault: UnitRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut units = MockUnitRepository::new();
    units.expect_exists().return_once(move |_| Err(fault));
    let service = command_service(
        MockCheckpointRepository::new(),
        units,
        MockCheckpointLedger::new(),
        now,
    );

    let err = service
        .register(request("CREATED"))
        .await
        .expect_err("store fault surfaces");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn register_maps_ledger_faults(now: DateTime<Utc>) {
    let mut ledger = MockCheckpointLedger::new();
    ledger
        .expect_append()
        .returning(|_, _| Err(CheckpointLedgerError::connection("down")));
    let service = command_service(no_duplicates(), known_unit(), ledger, now);

    let err = service
        .register(request("CREATED"))
        .await
        .expect_err("ledger fault surfaces");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

fn query_service(checkpoints: MockCheckpointRepository, units: MockUnitRepository) -> QueryService {
    TrackingQueryService::new(Arc::new(checkpoints), Arc::new(units))
}

#[rstest]
#[tokio::test]
async fn tracking_history_sorts_most_recent_first(now: DateTime<Utc>) {
    let mut units = MockUnitRepository::new();
    units
        .expect_find_by_tracking_id()
        .with(eq(tracking_id()))
        .returning(move |_| Ok(Some(seeded_unit(now))));
    let mut checkpoints = MockCheckpointRepository::new();
    checkpoints.expect_find_by_tracking_id().returning(move |_| {
        Ok(vec![
            checkpoint("early", CheckpointStatus::PickedUp, now - TimeDelta::hours(2)),
            checkpoint("late", CheckpointStatus::Delivered, now),
            checkpoint("tie-a", CheckpointStatus::InTransit, now - TimeDelta::hours(1)),
            checkpoint("tie-b", CheckpointStatus::AtFacility, now - TimeDelta::hours(1)),
        ])
    });

    let response = query_service(checkpoints, units)
        .tracking_history(GetTrackingHistoryRequest {
            tracking_id: "TRK001".to_owned(),
        })
        .await
        .expect("history found");

    let order: Vec<&str> = response
        .checkpoints
        .iter()
        .map(|checkpoint| checkpoint.id.as_str())
        .collect();
    assert_eq!(order, ["late", "tie-a", "tie-b", "early"]);
    assert_eq!(response.unit_id, unit_id());
    assert_eq!(response.current_status, CheckpointStatus::Created);
}

#[rstest]
#[tokio::test]
async fn tracking_history_requires_a_tracking_id() {
    let mut units = MockUnitRepository::new();
    units.expect_find_by_tracking_id().never();

    let err = query_service(MockCheckpointRepository::new(), units)
        .tracking_history(GetTrackingHistoryRequest {
            tracking_id: String::new(),
        })
        .await
        .expect_err("blank tracking id");

    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert_eq!(err.message(), "TrackingId is required");
}

#[rstest]
#[tokio::test]
async fn tracking_history_reports_unknown_tracking_ids() {
    let mut units = MockUnitRepository::new();
    units.expect_find_by_tracking_id().returning(|_| Ok(None));
    let mut checkpoints = MockCheckpointRepository::new();
    checkpoints.expect_find_by_tracking_id().never();

    let err = query_service(checkpoints, units)
        .tracking_history(GetTrackingHistoryRequest {
            tracking_id: "UNKNOWN_TRK".to_owned(),
        })
        .await
        .expect_err("unknown tracking id");

    assert_eq!(err.code(), ErrorCode::TrackingNotFound);
}

#[rstest]
#[case(None, CheckpointStatus::Created)]
#[case(Some(""), CheckpointStatus::Created)]
#[case(Some("CREATED"), CheckpointStatus::Created)]
#[case(Some("EXCEPTION"), CheckpointStatus::Exception)]
#[tokio::test]
async fn units_by_status_defaults_to_created(
    now: DateTime<Utc>,
    #[case] raw: Option<&str>,
    #[case] expected: CheckpointStatus,
) {
    let mut units = MockUnitRepository::new();
    units
        .expect_find_by_status()
        .with(eq(Some(expected)))
        .times(1)
        .returning(move |_| Ok(vec![seeded_unit(now)]));

    let response = query_service(MockCheckpointRepository::new(), units)
        .units_by_status(ListUnitsByStatusRequest {
            status: raw.map(str::to_owned),
        })
        .await
        .expect("listing succeeds");

    assert_eq!(response.units.len(), 1);
    assert_eq!(response.units[0].id, unit_id());
}

#[rstest]
#[case("LOST")]
#[case("   ")]
#[case(" CREATED ")]
#[tokio::test]
async fn units_by_status_rejects_unknown_statuses(#[case] raw: &str) {
    let mut units = MockUnitRepository::new();
    units.expect_find_by_status().never();

    let err = query_service(MockCheckpointRepository::new(), units)
        .units_by_status(ListUnitsByStatusRequest {
            status: Some(raw.to_owned()),
        })
        .await
        .expect_err("unknown status");

    assert_eq!(err.code(), ErrorCode::InvalidCheckpointStatus);
}
