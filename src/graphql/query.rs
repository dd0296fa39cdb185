//! Read resolvers. All of them accept anonymous callers except
//! `currentIdentity`, which errors when the request resolved to no identity.

use std::sync::Arc;

use async_graphql::Context;
use async_graphql::ErrorExtensions;
use async_graphql::Object;
use async_graphql::Result;

use crate::context::RequestContext;
use crate::error::ResolverError;
use crate::graphql::filter;
use crate::graphql::relations;
use crate::graphql::Creator;
use crate::graphql::Identity;
use crate::graphql::Work;
use crate::store::Store;

pub struct Query;

#[Object]
impl Query {
    async fn work_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let store = ctx.data::<Arc<dyn Store>>()?;
        let count = store
            .count_works()
            .await
            .map_err(|error| ResolverError::from(error).extend())?;
        Ok(count as i32)
    }

    async fn creator_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let store = ctx.data::<Arc<dyn Store>>()?;
        let count = store
            .count_creators()
            .await
            .map_err(|error| ResolverError::from(error).extend())?;
        Ok(count as i32)
    }

    async fn all_works(
        &self,
        ctx: &Context<'_>,
        author: Option<String>,
        genre: Option<String>,
    ) -> Result<Vec<Work>> {
        let store = ctx.data::<Arc<dyn Store>>()?;
        let works = store
            .list_works()
            .await
            .map_err(|error| ResolverError::from(error).extend())?;
        let creators = store
            .list_creators()
            .await
            .map_err(|error| ResolverError::from(error).extend())?;
        let filtered =
            filter::filter_works(works, &creators, author.as_deref(), genre.as_deref());
        Ok(filtered.into_iter().map(Work).collect())
    }

    async fn all_creators(&self, ctx: &Context<'_>) -> Result<Vec<Creator>> {
        let store = ctx.data::<Arc<dyn Store>>()?;
        let creators = store
            .list_creators()
            .await
            .map_err(|error| ResolverError::from(error).extend())?;
        let works = store
            .list_works()
            .await
            .map_err(|error| ResolverError::from(error).extend())?;
        Ok(relations::creators_with_counts(creators, &works))
    }

    async fn current_identity(&self, ctx: &Context<'_>) -> Result<Identity> {
        let request = ctx.data::<RequestContext>()?;
        let identity = request.require_identity().map_err(|error| error.extend())?;
        Ok(identity.clone().into())
    }
}
