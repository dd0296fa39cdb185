//! Entry point: loads configuration, wires the schema to the in-process
//! store, and serves GraphQL over HTTP.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use alexandria::auth::CredentialSigner;
use alexandria::auth::SystemSecret;
use alexandria::configuration::Configuration;
use alexandria::context::ContextBuilder;
use alexandria::graphql;
use alexandria::server;
use alexandria::server::ServerState;
use alexandria::store::MemoryStore;
use alexandria::store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let configuration = Configuration::from_env()?;

    let store: Arc<dyn Store> = Arc::new(MemoryStore::default());
    tracing::info!("using the in-process document store");

    let signer = Arc::new(CredentialSigner::new(&configuration.jwt_secret));
    let schema = graphql::build_schema(
        store.clone(),
        signer.clone(),
        SystemSecret(configuration.system_secret.clone()),
    );
    let context_builder = Arc::new(ContextBuilder::new(store, signer));

    let app = server::app(ServerState {
        schema,
        context_builder,
    });
    let listener = tokio::net::TcpListener::bind(configuration.listen).await?;
    tracing::info!(address = %configuration.listen, "server ready");
    axum::serve(listener, app).await?;
    Ok(())
}
