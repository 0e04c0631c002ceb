use std::sync::atomic::{AtomicBool, Ordering};

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Whether failure bodies carry a `stack` field. Off unless startup turns it on
/// for a non-production environment.
static EXPOSE_ERROR_DETAIL: AtomicBool = AtomicBool::new(false);

pub fn set_expose_error_detail(expose: bool) {
    EXPOSE_ERROR_DETAIL.store(expose, Ordering::Relaxed);
}

pub fn expose_error_detail() -> bool {
    EXPOSE_ERROR_DETAIL.load(Ordering::Relaxed)
}

/// The one place a `ServiceError` becomes an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self { ApiError(err) }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_body(rejection.body_text())
    }
}

impl ApiError {
    /// A body that is present but does not deserialize.
    pub fn invalid_body(err: impl std::fmt::Display) -> Self {
        warn!(rejection = %err, "request body rejected");
        ApiError(ServiceError::validation("Invalid data provided"))
    }

    pub fn route_not_found() -> Self {
        ApiError(ServiceError::NotFound("Route not found".into()))
    }
}

pub fn error_body(err: &ServiceError, expose: bool) -> ErrorBody {
    let stack = expose.then(|| err.detail().map(str::to_string).unwrap_or_else(|| format!("{err:?}")));
    ErrorBody { success: false, status: err.status_code(), message: err.to_string(), stack }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(status = status.as_u16(), message = %err, detail = err.detail().unwrap_or_default(), "request failed");
        } else {
            warn!(status = status.as_u16(), message = %err, "request rejected");
        }
        (status, Json(error_body(&err, expose_error_detail()))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
