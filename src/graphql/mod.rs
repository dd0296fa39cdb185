//! The GraphQL schema: types, read resolvers, and the mutation paths.

pub mod filter;
mod mutation;
mod query;
pub mod relations;
mod types;

pub use mutation::Mutation;
pub use query::Query;
pub use types::Creator;
pub use types::Credential;
pub use types::Identity;
pub use types::Work;

use std::sync::Arc;

use async_graphql::EmptySubscription;
use async_graphql::Schema;

use crate::auth::CredentialSigner;
use crate::auth::SystemSecret;
use crate::store::Store;

pub type CatalogSchema = Schema<Query, Mutation, EmptySubscription>;

pub fn build_schema(
    store: Arc<dyn Store>,
    signer: Arc<CredentialSigner>,
    system_secret: SystemSecret,
) -> CatalogSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(store)
        .data(signer)
        .data(system_secret)
        .finish()
}
