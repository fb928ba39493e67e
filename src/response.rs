//! Response bodies and status helpers.

use crate::service::FieldViolation;
use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body carrying a single fixed message, e.g. a delete confirmation or "Resource not found".
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "Resource deleted successfully")]
    pub message: String,
}

/// Body for unexpected failures: an operation-specific message and the underlying cause.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Error creating resource")]
    pub message: String,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    #[schema(example = "Validation failed")]
    pub message: String,
    pub errors: Vec<FieldViolation>,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn message(text: &str) -> (StatusCode, Json<MessageBody>) {
    ok(MessageBody {
        message: text.to_string(),
    })
}
