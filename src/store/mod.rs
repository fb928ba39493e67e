//! Storage boundary for resources. Every write checks field invariants before it lands.

mod memory;
mod postgres;

pub use memory::MemoryResourceStore;
pub use postgres::{ensure_database_exists, ensure_resources_table, PgResourceStore, RESOURCES_TABLE};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::model::{NewResource, Resource, ResourceFilter, ResourcePatch};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Insert with a fresh id and timestamps; returns the stored resource.
    async fn insert(&self, new: NewResource) -> Result<Resource, StoreError>;

    /// All resources matching the filter, oldest first.
    async fn find(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, StoreError>;

    /// Replace the supplied fields and bump `updated_at`. `None` when the id is unknown.
    async fn update_by_id(&self, id: Uuid, patch: ResourcePatch) -> Result<Option<Resource>, StoreError>;

    /// Hard delete. Returns the removed resource, or `None` when the id is unknown.
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Resource>, StoreError>;

    /// Cheap liveness check of the backing storage.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Open the configured store. For PostgreSQL this creates the database and table if missing.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn ResourceStore>, StoreError> {
    match config {
        StoreConfig::Memory => {
            tracing::info!("using in-memory resource store");
            Ok(Arc::new(MemoryResourceStore::new()))
        }
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await?;
            ensure_resources_table(&pool).await?;
            tracing::info!("connected to PostgreSQL resource store");
            Ok(Arc::new(PgResourceStore::new(pool)))
        }
    }
}
