//! Terminal error classification for the HTTP adapter.
//!
//! Handled tracker outcomes are answered inline by the handlers. Everything
//! else (unmatched routes, unreadable bodies, records that fail validation)
//! is forwarded here as an [`HttpFailure`] and rendered as plain text.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use tracing::{error, warn};

use crate::domain::RecordValidationError;

const DEFAULT_MESSAGE: &str = "Internal Server Error";

/// Failure forwarded to the terminal classifier.
///
/// A carried [`RecordValidationError`] takes precedence over the declared
/// status and message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpFailure {
    status: Option<StatusCode>,
    message: Option<String>,
    validation: Option<RecordValidationError>,
}

impl HttpFailure {
    /// Failure with an explicit status and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: Some(message.into()),
            validation: None,
        }
    }

    /// The catch-all for unmatched routes.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not found")
    }

    /// An unreadable request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Carried validation failure, if any.
    pub fn validation(&self) -> Option<&RecordValidationError> {
        self.validation.as_ref()
    }

    /// Message written to the response body.
    pub fn message(&self) -> &str {
        if let Some(first) = self.validation.as_ref().and_then(RecordValidationError::first) {
            return first.message();
        }
        self.message.as_deref().unwrap_or(DEFAULT_MESSAGE)
    }
}

impl From<RecordValidationError> for HttpFailure {
    fn from(validation: RecordValidationError) -> Self {
        Self {
            status: None,
            message: None,
            validation: Some(validation),
        }
    }
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status_code().as_u16(), self.message())
    }
}

impl std::error::Error for HttpFailure {}

impl ResponseError for HttpFailure {
    fn status_code(&self) -> StatusCode {
        if self.validation.is_some() {
            return StatusCode::BAD_REQUEST;
        }
        self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), message = self.message(), "request failed");
        } else {
            warn!(status = status.as_u16(), message = self.message(), "request rejected");
        }

        HttpResponse::build(status)
            .content_type(ContentType::plaintext())
            .body(self.message().to_owned())
    }
}

/// Default service for routes nothing else matched.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use exercise_tracker::inbound::http::error::not_found;
///
/// let app = App::new().default_service(web::to(not_found));
/// # let _ = app;
/// ```
pub async fn not_found(request: HttpRequest) -> Result<HttpResponse, HttpFailure> {
    warn!(method = %request.method(), path = request.path(), "no route matched");
    Err(HttpFailure::not_found())
}

/// JSON body limits and error forwarding.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| HttpFailure::bad_request(err.to_string()).into())
}

/// Form body limits and error forwarding.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| HttpFailure::bad_request(err.to_string()).into())
}

/// Query string error forwarding.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| HttpFailure::bad_request(err.to_string()).into())
}
