//! Generated OpenAPI document and the Swagger UI that browses it.

use crate::handlers;
use crate::model::Resource;
use crate::response::{ErrorBody, MessageBody, ValidationErrorBody};
use crate::routes::common;
use crate::service::{CreateResource, FieldViolation, ResourceIdPayload, UpdateResource};
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const DOCS_PATH: &str = "/api-docs";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Resource API",
        version = "1.0.0",
        description = "A simple API for managing resources"
    ),
    paths(
        common::health,
        handlers::resource::create,
        handlers::resource::list,
        handlers::resource::get_resource,
        handlers::resource::update,
        handlers::resource::delete,
    ),
    components(schemas(
        Resource,
        CreateResource,
        UpdateResource,
        ResourceIdPayload,
        MessageBody,
        ErrorBody,
        ValidationErrorBody,
        FieldViolation,
    )),
    tags(
        (name = "Resources", description = "Resource CRUD operations"),
        (name = "Health", description = "Liveness check")
    )
)]
pub struct ApiDoc;

/// Swagger UI under `/api-docs/`, serving the document at [`OPENAPI_PATH`].
pub fn docs_routes() -> Router {
    Router::new().merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
}
