//! Route tables and full application assembly.

pub mod common;
pub mod docs;
pub mod resource;

pub use common::common_routes;
pub use docs::{docs_routes, ApiDoc, DOCS_PATH, OPENAPI_PATH};
pub use resource::resource_routes;

use crate::middleware::log_requests;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, middleware, Router};
use tower_http::limit::RequestBodyLimitLayer;

/// Full router: health, docs, and the resource routes under `/api`.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(docs_routes())
        .nest("/api", resource_routes(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::from_fn(log_requests))
}
