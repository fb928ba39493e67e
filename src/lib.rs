//! Resource API: a validated REST CRUD service for resources, plus the sum-to-n utilities.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod sum;

pub use config::{ServerConfig, StoreConfig, StoreKind};
pub use error::{AppError, ConfigError, StoreError};
pub use model::{NewResource, Resource, ResourceFilter, ResourcePatch};
pub use routes::{app, common_routes, docs_routes, resource_routes, ApiDoc, DOCS_PATH, OPENAPI_PATH};
pub use state::AppState;
pub use store::{open_store, MemoryResourceStore, PgResourceStore, ResourceStore};
