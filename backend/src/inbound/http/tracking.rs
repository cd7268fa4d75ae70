//! Checkpoint and tracking HTTP handlers.
//!
//! ```text
//! POST /api/v1/checkpoints
//! GET  /api/v1/tracking/{trackingId}
//! GET  /api/v1/shipments?status=IN_TRANSIT
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    CheckpointPayload, GetTrackingHistoryRequest, ListUnitsByStatusRequest,
    RegisterCheckpointRequest, TrackingHistoryResponse, UnitPayload,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, format_timestamp, parse_optional_rfc3339_timestamp,
};

/// Request payload for registering a checkpoint.
///
/// Required fields are optional here so that a missing field reaches the
/// service and is reported with the same error as an empty one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCheckpointRequestBody {
    #[schema(example = "UNIT001")]
    pub unit_id: Option<String>,
    #[schema(example = "TRK001")]
    pub tracking_id: Option<String>,
    #[schema(example = "IN_TRANSIT")]
    pub status: Option<String>,
    #[schema(format = "date-time")]
    pub timestamp: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Checkpoint as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointResponseBody {
    pub id: String,
    pub unit_id: String,
    pub tracking_id: String,
    #[schema(example = "IN_TRANSIT")]
    pub status: String,
    #[schema(format = "date-time")]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

/// Tracking history, most recent checkpoint first.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingHistoryResponseBody {
    pub tracking_id: String,
    pub unit_id: String,
    pub current_status: String,
    pub checkpoints: Vec<CheckpointResponseBody>,
}

/// Unit with its full checkpoint history.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitResponseBody {
    pub id: String,
    pub tracking_id: String,
    pub current_status: String,
    pub checkpoint_history: Vec<CheckpointResponseBody>,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub last_updated: String,
}

/// Query string for the shipments listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShipmentsQuery {
    /// Status to match against current status or history; `CREATED` when omitted.
    pub status: Option<String>,
}

impl From<CheckpointPayload> for CheckpointResponseBody {
    fn from(value: CheckpointPayload) -> Self {
        Self {
            id: value.id.into(),
            unit_id: value.unit_id.into(),
            tracking_id: value.tracking_id.into(),
            status: value.status.to_string(),
            timestamp: format_timestamp(value.timestamp),
            location: value.location,
            description: value.description,
            created_at: format_timestamp(value.created_at),
        }
    }
}

impl From<TrackingHistoryResponse> for TrackingHistoryResponseBody {
    fn from(value: TrackingHistoryResponse) -> Self {
        Self {
            tracking_id: value.tracking_id.into(),
            unit_id: value.unit_id.into(),
            current_status: value.current_status.to_string(),
            checkpoints: value
                .checkpoints
                .into_iter()
                .map(CheckpointResponseBody::from)
                .collect(),
        }
    }
}

impl From<UnitPayload> for UnitResponseBody {
    fn from(value: UnitPayload) -> Self {
        Self {
            id: value.id.into(),
            tracking_id: value.tracking_id.into(),
            current_status: value.current_status.to_string(),
            checkpoint_history: value
                .checkpoint_history
                .into_iter()
                .map(CheckpointResponseBody::from)
                .collect(),
            created_at: format_timestamp(value.created_at),
            last_updated: format_timestamp(value.last_updated),
        }
    }
}

fn parse_register_body(
    body: RegisterCheckpointRequestBody,
) -> ApiResult<RegisterCheckpointRequest> {
    Ok(RegisterCheckpointRequest {
        unit_id: body.unit_id.unwrap_or_default(),
        tracking_id: body.tracking_id.unwrap_or_default(),
        status: body.status.unwrap_or_default(),
        timestamp: parse_optional_rfc3339_timestamp(body.timestamp, FieldName::new("timestamp"))?,
        location: body.location,
        description: body.description,
    })
}

/// Register a checkpoint and apply it to its unit.
#[utoipa::path(
    post,
    path = "/api/v1/checkpoints",
    request_body = RegisterCheckpointRequestBody,
    responses(
        (status = 201, description = "Checkpoint registered", body = CheckpointResponseBody),
        (status = 400, description = "Invalid request or status", body = ErrorSchema),
        (status = 404, description = "Unit not found", body = ErrorSchema),
        (status = 409, description = "Duplicate checkpoint", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["tracking"],
    operation_id = "registerCheckpoint"
)]
#[post("/checkpoints")]
pub async fn register_checkpoint(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterCheckpointRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_register_body(payload.into_inner())?;
    let checkpoint = state.checkpoints.register(request).await?;
    Ok(HttpResponse::Created().json(CheckpointResponseBody::from(checkpoint)))
}

/// Checkpoint history for a tracking id.
#[utoipa::path(
    get,
    path = "/api/v1/tracking/{trackingId}",
    params(("trackingId" = String, Path, description = "Tracking number", example = "TRK001")),
    responses(
        (status = 200, description = "Tracking history", body = TrackingHistoryResponseBody),
        (status = 400, description = "Invalid tracking id", body = ErrorSchema),
        (status = 404, description = "Tracking id not found", body = ErrorSchema)
    ),
    tags = ["tracking"],
    operation_id = "getTrackingHistory"
)]
#[get("/tracking/{tracking_id}")]
pub async fn get_tracking_history(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TrackingHistoryResponseBody>> {
    let response = state
        .tracking
        .tracking_history(GetTrackingHistoryRequest {
            tracking_id: path.into_inner(),
        })
        .await?;
    Ok(web::Json(TrackingHistoryResponseBody::from(response)))
}

/// Units currently in, or previously through, a status.
#[utoipa::path(
    get,
    path = "/api/v1/shipments",
    params(ShipmentsQuery),
    responses(
        (status = 200, description = "Matching units", body = [UnitResponseBody]),
        (status = 400, description = "Invalid status", body = ErrorSchema)
    ),
    tags = ["tracking"],
    operation_id = "listShipments"
)]
#[get("/shipments")]
pub async fn list_shipments(
    state: web::Data<HttpState>,
    query: web::Query<ShipmentsQuery>,
) -> ApiResult<web::Json<Vec<UnitResponseBody>>> {
    let response = state
        .tracking
        .units_by_status(ListUnitsByStatusRequest {
            status: query.into_inner().status,
        })
        .await?;
    Ok(web::Json(
        response
            .units
            .into_iter()
            .map(UnitResponseBody::from)
            .collect(),
    ))
}

#[cfg(test)]
#[path = "tracking_tests.rs"]
mod tests;
