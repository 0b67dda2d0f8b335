//! Request body extractor accepting JSON or URL-encoded forms.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures_util::future::{LocalBoxFuture, ready};
use serde::de::DeserializeOwned;

/// How a request body will be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    /// Read as a body with no fields.
    Ignored,
}

impl BodyKind {
    fn of(request: &HttpRequest) -> Self {
        let content_type = request.content_type();
        if content_type == "application/json" || content_type.ends_with("+json") {
            Self::Json
        } else if content_type == "application/x-www-form-urlencoded" {
            Self::Form
        } else {
            Self::Ignored
        }
    }
}

/// Body deserialised from JSON or a form, chosen by `Content-Type`.
///
/// Any other content type yields `T::default()`, so handlers see every field
/// as absent. Malformed JSON or form bodies are rejected through the
/// configured `JsonConfig`/`FormConfig` error handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<T>(pub T);

impl<T> Submission<T> {
    /// Unwrap the deserialised body.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for Submission<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        match BodyKind::of(req) {
            BodyKind::Json => {
                let extract = web::Json::<T>::from_request(req, payload);
                Box::pin(async move { Ok(Self(extract.await?.into_inner())) })
            }
            BodyKind::Form => {
                let extract = web::Form::<T>::from_request(req, payload);
                Box::pin(async move { Ok(Self(extract.await?.into_inner())) })
            }
            BodyKind::Ignored => Box::pin(ready(Ok(Self(T::default())))),
        }
    }
}
