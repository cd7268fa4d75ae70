//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use tracking::domain::DuplicateTolerance;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tolerance: DuplicateTolerance,
    pub(crate) seed_reference_units: bool,
}

impl ServerConfig {
    /// Construct a configuration with the default duplicate window and the
    /// reference units seeded.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            tolerance: DuplicateTolerance::default(),
            seed_reference_units: true,
        }
    }

    /// Override the duplicate detection window.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: DuplicateTolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Choose whether the store starts with the reference units.
    #[must_use]
    pub fn with_reference_units(mut self, seed: bool) -> Self {
        self.seed_reference_units = seed;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
