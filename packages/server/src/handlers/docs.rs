use axum::response::Redirect;

use crate::error::AppError;

/// `GET /` sends browsers to the API docs.
pub async fn redirect_to_docs() -> Redirect {
    Redirect::to("/docs")
}

/// Catch-all for requests no route or static form matched.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
