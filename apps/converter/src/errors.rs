use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::storage::StoreError;

/// Coarse failure class, matched on by every entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ParameterMissing,
    Decoding,
    RemoteIo,
    Unknown,
}

/// Failure of a conversion run. Nothing is retried; the first error aborts.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Missing required parameters: {}", .0.join(", "))]
    ParameterMissing(Vec<&'static str>),

    #[error("Source object is not valid UTF-8: {0}")]
    Decoding(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    RemoteIo(#[from] StoreError),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::ParameterMissing(_) => ErrorKind::ParameterMissing,
            ConvertError::Decoding(_) => ErrorKind::Decoding,
            ConvertError::RemoteIo(_) => ErrorKind::RemoteIo,
            ConvertError::Unknown(_) => ErrorKind::Unknown,
        }
    }
}

/// HTTP-facing error. Implements `IntoResponse` so Axum handlers can return
/// `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Convert(e) => match e.kind() {
                ErrorKind::ParameterMissing => (StatusCode::BAD_REQUEST, "PARAMETER_MISSING"),
                ErrorKind::Decoding => {
                    tracing::error!("Decoding error: {e}");
                    (StatusCode::INTERNAL_SERVER_ERROR, "DECODING_ERROR")
                }
                ErrorKind::RemoteIo => {
                    tracing::error!("Storage error: {e}");
                    (StatusCode::INTERNAL_SERVER_ERROR, "REMOTE_IO_ERROR")
                }
                ErrorKind::Unknown => {
                    tracing::error!("Internal error: {e:?}");
                    (StatusCode::INTERNAL_SERVER_ERROR, "UNKNOWN_ERROR")
                }
            },
        };

        let body = Json(json!({
            "status": "error",
            "error": code,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
