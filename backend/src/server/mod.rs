//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use tracking::Trace;
#[cfg(debug_assertions)]
use tracking::doc::ApiDoc;
use tracking::inbound::http::health::{HealthState, live, ready};
use tracking::inbound::http::json_config;
use tracking::inbound::http::state::HttpState;
use tracking::inbound::http::tracking::{get_tracking_history, list_shipments, register_checkpoint};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(register_checkpoint)
        .service(get_tracking_history)
        .service(list_shipments);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness flips once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! End-to-end checks against the fully wired application.

    use std::net::SocketAddr;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};
    use tracking::domain::TRACE_ID_HEADER;
    use tracking::test_support::{FixedClock, SequentialIdGenerator};

    use super::state_builders::{build_http_state_with, build_store};
    use super::*;

    fn wired_state() -> HttpState {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 9, 30, 12, 0, 0)
                .single()
                .expect("valid instant"),
        ));
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)));
        let store = Arc::new(build_store(&config, clock.as_ref()));
        build_http_state_with(store, Arc::new(SequentialIdGenerator::default()), clock)
    }

    #[actix_web::test]
    async fn registered_checkpoint_shows_in_history_with_trace_header() {
        let health = web::Data::new(HealthState::new());
        let app = actix_test::init_service(build_app(health, web::Data::new(wired_state()))).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/checkpoints")
            .set_json(json!({
                "unitId": "UNIT001",
                "trackingId": "TRK001",
                "status": "IN_TRANSIT",
                "location": "Distribution Center A"
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/tracking/TRK001")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["currentStatus"], "IN_TRANSIT");
        assert_eq!(body["checkpoints"][0]["location"], "Distribution Center A");
    }

    #[actix_web::test]
    async fn readiness_reflects_health_state() {
        let health = web::Data::new(HealthState::new());
        let app = actix_test::init_service(build_app(
            health.clone(),
            web::Data::new(wired_state()),
        ))
        .await;

        let request = actix_test::TestRequest::get().uri("/health/ready").to_request();
        let before = actix_test::call_service(&app, request).await.status();
        health.mark_ready();
        let request = actix_test::TestRequest::get().uri("/health/ready").to_request();
        let after = actix_test::call_service(&app, request).await.status();

        assert_eq!(before, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(after, StatusCode::OK);
    }
}
