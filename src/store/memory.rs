//! In-process store keeping resources in insertion order.

use super::ResourceStore;
use crate::error::StoreError;
use crate::model::{NewResource, Resource, ResourceFilter, ResourcePatch};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryResourceStore {
    resources: RwLock<Vec<Resource>>,
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    async fn insert(&self, new: NewResource) -> Result<Resource, StoreError> {
        new.check()?;
        let now = Utc::now();
        let resource = Resource {
            id: Uuid::new_v4(),
            owner: new.owner,
            kind: new.kind,
            details: new.details,
            amount: new.amount,
            created_at: now,
            updated_at: now,
        };
        self.resources.write().await.push(resource.clone());
        Ok(resource)
    }

    async fn find(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, StoreError> {
        let resources = self.resources.read().await;
        Ok(resources.iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, StoreError> {
        let resources = self.resources.read().await;
        Ok(resources.iter().find(|r| r.id == id).cloned())
    }

    async fn update_by_id(&self, id: Uuid, patch: ResourcePatch) -> Result<Option<Resource>, StoreError> {
        patch.check()?;
        let mut resources = self.resources.write().await;
        let Some(slot) = resources.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        let mut updated = slot.clone();
        updated.apply(patch);
        updated.check()?;
        updated.updated_at = Utc::now();
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Resource>, StoreError> {
        let mut resources = self.resources.write().await;
        Ok(resources
            .iter()
            .position(|r| r.id == id)
            .map(|idx| resources.remove(idx)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
