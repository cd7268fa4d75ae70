//! Checkpoint tracking service library.
//!
//! Records logistics checkpoints against provisioned units, keeps each
//! unit's current status and history up to date, and answers tracking and
//! status queries over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
