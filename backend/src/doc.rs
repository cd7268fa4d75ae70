//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the tracking endpoints, the health probes and the
//! error schema wrappers from [`crate::inbound::http::schemas`]. Swagger UI
//! serves it in debug builds and `openapi-dump` prints it for tooling.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::tracking::{
    CheckpointResponseBody, RegisterCheckpointRequestBody, TrackingHistoryResponseBody,
    UnitResponseBody,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Checkpoint tracking API",
        description = "Record logistics checkpoints and query unit tracking history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tracking::register_checkpoint,
        crate::inbound::http::tracking::get_tracking_history,
        crate::inbound::http::tracking::list_shipments,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterCheckpointRequestBody,
        CheckpointResponseBody,
        TrackingHistoryResponseBody,
        UnitResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "tracking", description = "Checkpoint registration and tracking queries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
