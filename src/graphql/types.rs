//! GraphQL object types.

use std::sync::Arc;

use async_graphql::Context;
use async_graphql::ErrorExtensions;
use async_graphql::Object;
use async_graphql::Result;
use async_graphql::SimpleObject;
use async_graphql::ID;

use crate::error::ResolverError;
use crate::graphql::relations;
use crate::store::IdentityRecord;
use crate::store::Store;
use crate::store::WorkRecord;

/// The single authenticated-user record.
#[derive(Debug, SimpleObject)]
pub struct Identity {
    pub handle: String,
    pub favorite_genre: String,
    pub id: ID,
}

impl From<IdentityRecord> for Identity {
    fn from(record: IdentityRecord) -> Self {
        Self {
            handle: record.handle,
            favorite_genre: record.favorite_genre,
            id: ID(record.id),
        }
    }
}

/// A signed credential, opaque to the caller.
#[derive(Debug, SimpleObject)]
pub struct Credential {
    pub value: String,
}

/// An author with its derived work count. `book_count` is computed from the
/// work collection at read time, never read back from storage.
#[derive(Debug, PartialEq, Eq, SimpleObject)]
pub struct Creator {
    pub name: String,
    pub born: Option<i32>,
    pub book_count: i32,
}

/// A book. The `author` field resolves the creator reference on demand.
pub struct Work(pub WorkRecord);

#[Object]
impl Work {
    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn published(&self) -> i32 {
        self.0.published
    }

    async fn genres(&self) -> &Vec<String> {
        &self.0.genres
    }

    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<Creator> {
        let store = ctx.data::<Arc<dyn Store>>()?;
        let creator = store
            .find_creator_by_id(&self.0.creator_id)
            .await
            .map_err(|error| ResolverError::from(error).extend())?
            .ok_or_else(|| {
                ResolverError::DanglingCreatorReference {
                    title: self.0.title.clone(),
                }
                .extend()
            })?;
        let works = store
            .list_works()
            .await
            .map_err(|error| ResolverError::from(error).extend())?;
        Ok(Creator {
            book_count: relations::work_count_for(&works, &creator.id),
            name: creator.name,
            born: creator.born,
        })
    }
}
