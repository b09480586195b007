use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Request};
use axum::http::{StatusCode, header};
use axum_typed_multipart::{TypedMultipart, TypedMultipartError};

use crate::error::AppError;

/// A `TypedMultipart<T>` wrapper that converts parse errors into [`AppError`].
///
/// A field over its declared limit becomes `PAYLOAD_TOO_LARGE`; every other
/// problem is a validation error.
pub struct AppMultipart<T>(pub T);

impl<S, T> FromRequest<S> for AppMultipart<T>
where
    TypedMultipart<T>: FromRequest<S, Rejection = TypedMultipartError>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let TypedMultipart(value) = TypedMultipart::<T>::from_request(req, state)
            .await
            .map_err(multipart_error)?;
        Ok(AppMultipart(value))
    }
}

/// Like [`AppMultipart`], but a multipart body without any parts decodes as
/// `T::default()`.
///
/// A form whose only field was left out is sent as just the closing boundary,
/// which the multipart parser rejects as an incomplete stream.
pub struct OptionalMultipart<T>(pub T);

impl<S, T> FromRequest<S> for OptionalMultipart<T>
where
    T: Default,
    TypedMultipart<T>: FromRequest<S, Rejection = TypedMultipartError>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        let extensions = req.extensions().clone();
        let boundary = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(multipart_boundary);

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(e.body_text())
            } else {
                AppError::Validation(e.body_text())
            }
        })?;

        if let Some(boundary) = &boundary
            && is_partless(&bytes, boundary)
        {
            return Ok(OptionalMultipart(T::default()));
        }

        let mut req = Request::new(Body::from(bytes));
        *req.headers_mut() = headers;
        *req.extensions_mut() = extensions;
        let TypedMultipart(value) = TypedMultipart::<T>::from_request(req, state)
            .await
            .map_err(multipart_error)?;
        Ok(OptionalMultipart(value))
    }
}

fn multipart_error(e: TypedMultipartError) -> AppError {
    match e {
        TypedMultipartError::FieldTooLarge { .. } => AppError::PayloadTooLarge(e.to_string()),
        other => AppError::Validation(other.to_string()),
    }
}

/// Boundary parameter of a `multipart/form-data` content type.
fn multipart_boundary(content_type: &str) -> Option<String> {
    let mut params = content_type.split(';');
    let mime = params.next()?.trim();
    if !mime.eq_ignore_ascii_case("multipart/form-data") {
        return None;
    }
    params.find_map(|param| {
        let (key, value) = param.trim().split_once('=')?;
        key.eq_ignore_ascii_case("boundary")
            .then(|| value.trim_matches('"').to_string())
            .filter(|b| !b.is_empty())
    })
}

/// True for an empty body or one holding only the closing delimiter.
fn is_partless(body: &[u8], boundary: &str) -> bool {
    let body = body.trim_ascii();
    body.is_empty() || body == format!("--{boundary}--").as_bytes()
}
