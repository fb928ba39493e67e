//! Typed errors and HTTP mapping.

use crate::response::{ErrorBody, MessageBody, ValidationErrorBody};
use crate::service::FieldViolation;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    /// A write would leave a resource violating its field constraints.
    #[error("resource validation failed: {0}")]
    Invariant(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("Resource not found")]
    NotFound,
    /// Payload could not be read or parsed before validation ran.
    #[error("{message}: {error}")]
    Malformed {
        status: StatusCode,
        message: &'static str,
        error: String,
    },
    #[error("{message}: {error}")]
    Server { message: &'static str, error: String },
}

impl AppError {
    /// Wrap an unexpected failure with an operation-specific message.
    pub fn server(message: &'static str, error: impl Display) -> Self {
        AppError::Server {
            message,
            error: error.to_string(),
        }
    }

    pub fn malformed(status: StatusCode, error: impl Display) -> Self {
        AppError::Malformed {
            status,
            message: "Malformed request body",
            error: error.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorBody {
                    message: "Validation failed".into(),
                    errors,
                }),
            )
                .into_response(),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(MessageBody {
                    message: "Resource not found".into(),
                }),
            )
                .into_response(),
            AppError::Malformed {
                status,
                message,
                error,
            } => (
                status,
                Json(ErrorBody {
                    message: message.into(),
                    error,
                }),
            )
                .into_response(),
            AppError::Server { message, error } => {
                tracing::error!(%error, "{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        message: message.into(),
                        error,
                    }),
                )
                    .into_response()
            }
        }
    }
}
