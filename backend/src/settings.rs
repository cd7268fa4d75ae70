//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `TRACKING_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_DUPLICATE_TOLERANCE_MS, DuplicateTolerance, TrackingValidationError};

/// Port the HTTP server binds to when none is configured.
pub const DEFAULT_PORT: u16 = 3000;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Configuration values controlling the tracking server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRACKING")]
pub struct TrackingSettings {
    /// Address to bind the HTTP listener to.
    pub host: Option<IpAddr>,
    /// Port to bind the HTTP listener to.
    pub port: Option<u16>,
    /// Window in milliseconds within which a checkpoint with the same unit
    /// and status counts as a duplicate.
    pub duplicate_tolerance_ms: Option<u64>,
    /// Seed the store with the reference units on startup.
    pub seed_reference_units: Option<bool>,
}

impl TrackingSettings {
    /// Socket address for the HTTP listener.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Whether the reference units are seeded on startup. Defaults to `true`.
    #[must_use]
    pub fn seed_reference_units(&self) -> bool {
        self.seed_reference_units.unwrap_or(true)
    }

    /// Duplicate detection window.
    ///
    /// # Errors
    /// Returns [`TrackingValidationError::InvalidTolerance`] for a zero or
    /// out-of-range window.
    pub fn duplicate_tolerance(&self) -> Result<DuplicateTolerance, TrackingValidationError> {
        DuplicateTolerance::from_millis(
            self.duplicate_tolerance_ms
                .unwrap_or(DEFAULT_DUPLICATE_TOLERANCE_MS),
        )
    }
}
