//! Tracking service entry-point: loads settings, wires the in-memory store
//! and serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use tracking::inbound::http::health::HealthState;
use tracking::settings::TrackingSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = TrackingSettings::load().wrap_err("failed to load tracking settings")?;
    let tolerance = settings
        .duplicate_tolerance()
        .wrap_err("invalid duplicate tolerance")?;
    let config = ServerConfig::new(settings.bind_addr())
        .with_tolerance(tolerance)
        .with_reference_units(settings.seed_reference_units());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {}", config.bind_addr()))?;
    info!(addr = %config.bind_addr(), %tolerance, "tracking service listening");
    server.await.wrap_err("server terminated with an error")
}
