//! HTTP inbound adapter exposing the exercise tracker API.

pub mod body;
pub mod error;
pub mod exercise;
pub mod exercise_dto;
pub mod health;
pub mod landing;
pub mod state;

use actix_web::web;

pub use error::HttpFailure;

/// Register the landing page, the `/api/exercise` scope and the body and
/// query error handlers.
///
/// Health probes and the not-found fallback are registered by the caller,
/// which owns the `App`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use exercise_tracker::inbound::http::{configure, error::not_found};
///
/// let app = App::new()
///     .configure(configure)
///     .default_service(web::to(not_found));
/// # let _ = app;
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::form_config())
        .app_data(error::query_config())
        .service(landing::index)
        .service(
            web::scope("/api/exercise")
                .service(exercise::create_user)
                .service(exercise::add_exercise)
                .service(exercise::list_users)
                .service(exercise::exercise_log),
        );
}
