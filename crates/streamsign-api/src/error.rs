//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Errors render as a plain-text
//! body carrying the failing stage's message, with the status taken from `ErrorMetadata`.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use streamsign_core::{AppError, ErrorMetadata, LogLevel};

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: both the trait and AppError are foreign to this crate).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::Internal(err.to_string()))
    }
}

pub(crate) fn log_error(error: &AppError) {
    let code = error.error_code();
    let stage = error.stage();
    let recoverable = error.is_recoverable();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_code = code, stage, recoverable, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_code = code, stage, recoverable, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_code = code, stage, recoverable, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            app_error.client_message(),
        )
            .into_response()
    }
}
