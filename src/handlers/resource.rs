//! Resource handlers: create, list, get, update, delete.
//!
//! Each handler makes exactly one store call. A missing lookup result is a 404;
//! any store failure becomes a 500 with an operation-specific message.

use crate::error::AppError;
use crate::extractors::{ValidatedJson, ValidatedQuery};
use crate::model::{Resource, ResourceFilter};
use crate::response::{created, message, ok, ErrorBody, MessageBody, ValidationErrorBody};
use crate::service::{CreateResource, ResourceIdPayload, UpdateResource};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

#[utoipa::path(
    post,
    path = "/api/resources/create",
    tag = "Resources",
    request_body = CreateResource,
    responses(
        (status = 201, description = "Resource created successfully", body = Resource),
        (status = 400, description = "Validation failed", body = ValidationErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateResource>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state
        .store
        .insert(body.into())
        .await
        .map_err(|e| AppError::server("Error creating resource", e))?;
    tracing::info!(id = %resource.id, "resource created");
    Ok(created(resource))
}

#[utoipa::path(
    get,
    path = "/api/resources/list",
    tag = "Resources",
    params(ResourceFilter),
    responses(
        (status = 200, description = "Resources found", body = Vec<Resource>),
        (status = 400, description = "Validation failed", body = ValidationErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(filter): ValidatedQuery<ResourceFilter>,
) -> Result<impl IntoResponse, AppError> {
    let resources = state
        .store
        .find(&filter)
        .await
        .map_err(|e| AppError::server("Error listing resources", e))?;
    Ok(ok(resources))
}

#[utoipa::path(
    get,
    path = "/api/resources/get-resource",
    tag = "Resources",
    params(ResourceIdPayload),
    responses(
        (status = 200, description = "Resource found", body = Resource),
        (status = 400, description = "Validation failed", body = ValidationErrorBody),
        (status = 404, description = "Resource not found", body = MessageBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub async fn get_resource(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ResourceIdPayload>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state
        .store
        .find_by_id(query.resource_id)
        .await
        .map_err(|e| AppError::server("Error getting resource", e))?
        .ok_or(AppError::NotFound)?;
    Ok(ok(resource))
}

#[utoipa::path(
    put,
    path = "/api/resources/update",
    tag = "Resources",
    request_body = UpdateResource,
    responses(
        (status = 200, description = "Resource updated successfully", body = Resource),
        (status = 400, description = "Validation failed", body = ValidationErrorBody),
        (status = 404, description = "Resource not found", body = MessageBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<UpdateResource>,
) -> Result<impl IntoResponse, AppError> {
    let (id, patch) = body.into_patch();
    let resource = state
        .store
        .update_by_id(id, patch)
        .await
        .map_err(|e| AppError::server("Error updating resource", e))?
        .ok_or(AppError::NotFound)?;
    tracing::info!(id = %resource.id, "resource updated");
    Ok(ok(resource))
}

#[utoipa::path(
    delete,
    path = "/api/resources/delete",
    tag = "Resources",
    request_body = ResourceIdPayload,
    responses(
        (status = 200, description = "Resource deleted successfully", body = MessageBody),
        (status = 400, description = "Validation failed", body = ValidationErrorBody),
        (status = 404, description = "Resource not found", body = MessageBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ResourceIdPayload>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state
        .store
        .delete_by_id(body.resource_id)
        .await
        .map_err(|e| AppError::server("Error deleting resource", e))?
        .ok_or(AppError::NotFound)?;
    tracing::info!(id = %removed.id, "resource deleted");
    Ok(message("Resource deleted successfully"))
}
