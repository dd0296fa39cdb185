//! The four write paths. `addWork` and `editCreator` pass the
//! authentication gate before any side effect; the other two are the
//! account-creation and login paths and take no credential.

use std::sync::Arc;

use async_graphql::Context;
use async_graphql::ErrorExtensions;
use async_graphql::Object;
use async_graphql::Result;

use crate::auth::Claims;
use crate::auth::CredentialSigner;
use crate::auth::SystemSecret;
use crate::context::RequestContext;
use crate::error::ResolverError;
use crate::graphql::relations;
use crate::graphql::Creator;
use crate::graphql::Credential;
use crate::graphql::Identity;
use crate::graphql::Work;
use crate::store::CreatorRecord;
use crate::store::IdentityRecord;
use crate::store::Store;
use crate::store::WorkRecord;

pub struct Mutation;

#[Object]
impl Mutation {
    /// Replaces the entire identity set with one record. The store holds at
    /// most one identity at any time.
    async fn create_identity(
        &self,
        ctx: &Context<'_>,
        handle: String,
        favorite_genre: String,
    ) -> Result<Identity> {
        let store = ctx.data::<Arc<dyn Store>>()?;
        store
            .delete_all_identities()
            .await
            .map_err(|error| ResolverError::from(error).extend())?;
        let record = IdentityRecord::new(handle, favorite_genre)
            .map_err(|error| ResolverError::persistence_conflict(error).extend())?;
        let saved = store
            .insert_identity(record)
            .await
            .map_err(|error| ResolverError::persistence_conflict(error).extend())?;
        tracing::info!(handle = %saved.handle, "identity created");
        Ok(saved.into())
    }

    /// The login path: checks the fixed system secret and signs a claim
    /// binding the identity's handle and id.
    async fn issue_credential(
        &self,
        ctx: &Context<'_>,
        handle: String,
        secret: String,
    ) -> Result<Credential> {
        let store = ctx.data::<Arc<dyn Store>>()?;
        let signer = ctx.data::<Arc<CredentialSigner>>()?;
        let system_secret = ctx.data::<SystemSecret>()?;

        let identity = store
            .find_identity_by_handle(&handle)
            .await
            .map_err(|error| ResolverError::from(error).extend())?;
        let Some(identity) = identity.filter(|_| secret == system_secret.0) else {
            tracing::debug!(%handle, "credential issuance refused");
            return Err(ResolverError::WrongCredentials.extend());
        };

        let value = signer
            .sign(&Claims {
                handle: identity.handle,
                id: identity.id,
            })
            .map_err(|error| ResolverError::from(error).extend())?;
        Ok(Credential { value })
    }

    /// Attaches a work to the named creator, minting the creator first when
    /// the name is unknown. The lookup and the create are separate store
    /// calls, so two concurrent adds for a new name can both create the
    /// creator; that race is accepted.
    async fn add_work(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        published: i32,
        genres: Vec<String>,
    ) -> Result<Work> {
        let request = ctx.data::<RequestContext>()?;
        request.require_identity().map_err(|error| error.extend())?;
        let store = ctx.data::<Arc<dyn Store>>()?;

        let creator = match store
            .find_creator_by_name(&author)
            .await
            .map_err(|error| ResolverError::from(error).extend())?
        {
            Some(existing) => existing,
            None => {
                let record = CreatorRecord::new(author)
                    .map_err(|error| ResolverError::invalid_input(error).extend())?;
                store
                    .insert_creator(record)
                    .await
                    .map_err(|error| ResolverError::invalid_input(error).extend())?
            }
        };

        let record = WorkRecord::new(title, published, genres, creator.id)
            .map_err(|error| ResolverError::invalid_input(error).extend())?;
        let saved = store
            .insert_work(record)
            .await
            .map_err(|error| ResolverError::invalid_input(error).extend())?;
        tracing::info!(title = %saved.title, "work added");
        Ok(Work(saved))
    }

    /// Sets a creator's birth year. Unknown names are a normal null
    /// outcome, not an error. The returned count is computed *before* the
    /// update; the stored record never carries a count.
    async fn edit_creator(
        &self,
        ctx: &Context<'_>,
        name: String,
        set_born_to: i32,
    ) -> Result<Option<Creator>> {
        let request = ctx.data::<RequestContext>()?;
        request.require_identity().map_err(|error| error.extend())?;
        let store = ctx.data::<Arc<dyn Store>>()?;

        let Some(creator) = store
            .find_creator_by_name(&name)
            .await
            .map_err(|error| ResolverError::from(error).extend())?
        else {
            return Ok(None);
        };

        let works = store
            .list_works()
            .await
            .map_err(|error| ResolverError::from(error).extend())?;
        let book_count = relations::work_count_for(&works, &creator.id);

        let updated = store
            .update_creator(CreatorRecord {
                born: Some(set_born_to),
                ..creator
            })
            .await
            .map_err(|error| ResolverError::from(error).extend())?;
        // The creator vanished between lookup and update: same null outcome
        // as an unknown name.
        let Some(updated) = updated else {
            return Ok(None);
        };

        Ok(Some(Creator {
            name: updated.name,
            born: updated.born,
            book_count,
        }))
    }
}
