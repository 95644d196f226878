use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Any failure while serving a request. Always rendered as a bare 500.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] ng_core::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
