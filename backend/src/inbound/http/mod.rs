//! HTTP inbound adapter exposing the tracking REST endpoints.

use actix_web::web;

use crate::domain::Error;

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod tracking;
pub mod validation;

pub use error::ApiResult;

/// JSON extractor configuration reporting malformed bodies as validation
/// errors instead of Actix's plain-text 400.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use tracking::inbound::http::json_config;
///
/// let app = App::new().app_data(json_config());
/// # let _ = app;
/// ```
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::validation(format!("Invalid request body: {err}")).into()
    })
}
