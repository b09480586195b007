use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor for partial updates.
///
/// An empty body decodes as `T::default()` (nothing to change). Malformed JSON
/// becomes `AppError::Validation` so clients always get a structured error.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(AppJson(T::default()));
        }

        let Json(value) =
            Json::<T>::from_bytes(&bytes).map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(AppJson(value))
    }
}
