//! Mapping from engine errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dpb_core::PasteError;

/// Engine error on its way out of a handler.
#[derive(Debug)]
pub struct HttpError(pub PasteError);

impl From<PasteError> for HttpError {
    fn from(value: PasteError) -> Self {
        Self(value)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self.0 {
            // Uniform message whatever the underlying cause.
            PasteError::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
            err @ PasteError::InvalidContentType => {
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            err => {
                tracing::error!("Failed saving paste: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("failed saving paste ({})", err),
                )
                    .into_response()
            }
        }
    }
}
