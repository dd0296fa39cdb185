//! HTTP wiring: one endpoint serving the playground on GET and GraphQL on
//! POST. The `Authorization` header is resolved into a [`RequestContext`]
//! here, once, before the schema executes anything.

use std::sync::Arc;

use async_graphql::http::playground_source;
use async_graphql::http::GraphQLPlaygroundConfig;
use async_graphql::ErrorExtensions;
use async_graphql::Pos;
use async_graphql_axum::GraphQLRequest;
use async_graphql_axum::GraphQLResponse;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::context::ContextBuilder;
use crate::error::ResolverError;
use crate::graphql::CatalogSchema;

#[derive(Clone)]
pub struct ServerState {
    pub schema: CatalogSchema,
    pub context_builder: Arc<ContextBuilder>,
}

pub fn app(state: ServerState) -> Router {
    Router::new()
        .route("/", get(playground).post(graphql_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn graphql_handler(
    State(state): State<ServerState>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let request_context = match state.context_builder.build(authorization).await {
        Ok(context) => context,
        Err(error) => {
            tracing::error!(%error, "identity lookup failed");
            let error = ResolverError::from(error)
                .extend()
                .into_server_error(Pos { line: 0, column: 0 });
            return async_graphql::Response::from_errors(vec![error]).into();
        }
    };
    state
        .schema
        .execute(request.into_inner().data(request_context))
        .await
        .into()
}

async fn playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/")))
}
