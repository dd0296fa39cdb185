//! In-process document store.
//!
//! Collections are plain vectors behind one async lock, so list order is
//! insertion order. Single-document atomicity only: each trait call takes
//! the lock once and nothing spans calls, which makes the accepted
//! find-or-create race observable under concurrency.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::CreatorRecord;
use crate::store::IdentityRecord;
use crate::store::Store;
use crate::store::StoreError;
use crate::store::WorkRecord;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

#[derive(Debug, Default)]
struct Collections {
    identities: Vec<IdentityRecord>,
    creators: Vec<CreatorRecord>,
    works: Vec<WorkRecord>,
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_identity_by_id(&self, id: &str) -> Result<Option<IdentityRecord>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .identities
            .iter()
            .find(|identity| identity.id == id)
            .cloned())
    }

    async fn find_identity_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<IdentityRecord>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .identities
            .iter()
            .find(|identity| identity.handle == handle)
            .cloned())
    }

    async fn delete_all_identities(&self) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections.identities.clear();
        Ok(())
    }

    async fn insert_identity(
        &self,
        identity: IdentityRecord,
    ) -> Result<IdentityRecord, StoreError> {
        let mut collections = self.collections.write().await;
        if collections
            .identities
            .iter()
            .any(|existing| existing.handle == identity.handle)
        {
            return Err(StoreError::Constraint { field: "handle" });
        }
        collections.identities.push(identity.clone());
        Ok(identity)
    }

    async fn find_creator_by_id(&self, id: &str) -> Result<Option<CreatorRecord>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .creators
            .iter()
            .find(|creator| creator.id == id)
            .cloned())
    }

    async fn find_creator_by_name(
        &self,
        name: &str,
    ) -> Result<Option<CreatorRecord>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .creators
            .iter()
            .find(|creator| creator.name == name)
            .cloned())
    }

    async fn insert_creator(&self, creator: CreatorRecord) -> Result<CreatorRecord, StoreError> {
        // Names are not unique here, duplicates are an accepted race.
        let mut collections = self.collections.write().await;
        collections.creators.push(creator.clone());
        Ok(creator)
    }

    async fn update_creator(
        &self,
        creator: CreatorRecord,
    ) -> Result<Option<CreatorRecord>, StoreError> {
        let mut collections = self.collections.write().await;
        match collections
            .creators
            .iter_mut()
            .find(|existing| existing.id == creator.id)
        {
            Some(existing) => {
                *existing = creator.clone();
                Ok(Some(creator))
            }
            None => Ok(None),
        }
    }

    async fn list_creators(&self) -> Result<Vec<CreatorRecord>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.creators.clone())
    }

    async fn count_creators(&self) -> Result<usize, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.creators.len())
    }

    async fn insert_work(&self, work: WorkRecord) -> Result<WorkRecord, StoreError> {
        let mut collections = self.collections.write().await;
        if collections
            .works
            .iter()
            .any(|existing| existing.title == work.title)
        {
            return Err(StoreError::Constraint { field: "title" });
        }
        collections.works.push(work.clone());
        Ok(work)
    }

    async fn list_works(&self) -> Result<Vec<WorkRecord>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.works.clone())
    }

    async fn count_works(&self) -> Result<usize, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.works.len())
    }
}
