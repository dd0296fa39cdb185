//! Request-boundary tests: the bearer header is parsed once per request and
//! the resulting context gates mutations while reads stay open.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::json;
use serde_json::Value;
use tower::ServiceExt;

use alexandria::auth::CredentialSigner;
use alexandria::auth::SystemSecret;
use alexandria::context::ContextBuilder;
use alexandria::graphql;
use alexandria::server;
use alexandria::server::ServerState;
use alexandria::store::MemoryStore;
use alexandria::store::Store;

fn app() -> Router {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::default());
    let signer = Arc::new(CredentialSigner::new("sekret"));
    let schema = graphql::build_schema(
        store.clone(),
        signer.clone(),
        SystemSecret("secret".to_string()),
    );
    server::app(ServerState {
        schema,
        context_builder: Arc::new(ContextBuilder::new(store, signer)),
    })
}

async fn post(app: &Router, query: &str, bearer: Option<&str>) -> Value {
    let mut request = Request::builder()
        .method("POST")
        .uri("/")
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        request = request.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = serde_json::to_vec(&json!({ "query": query })).unwrap();
    let response = app
        .clone()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn login_flow_issues_a_credential_that_unlocks_mutations() {
    let app = app();
    post(
        &app,
        r#"mutation { createIdentity(handle: "librarian", favoriteGenre: "fantasy") { id } }"#,
        None,
    )
    .await;
    let login = post(
        &app,
        r#"mutation { issueCredential(handle: "librarian", secret: "secret") { value } }"#,
        None,
    )
    .await;
    let token = login["data"]["issueCredential"]["value"].as_str().unwrap();

    let added = post(
        &app,
        r#"mutation { addWork(title: "HP", author: "Rowling", published: 1997, genres: ["fantasy"]) { title author { name } } }"#,
        Some(token),
    )
    .await;
    assert_eq!(
        added["data"]["addWork"],
        json!({ "title": "HP", "author": { "name": "Rowling" } })
    );

    let identity = post(&app, "{ currentIdentity { handle } }", Some(token)).await;
    assert_eq!(identity["data"]["currentIdentity"]["handle"], "librarian");
}

#[tokio::test]
async fn anonymous_mutations_are_refused_at_the_boundary() {
    let app = app();
    let response = post(
        &app,
        r#"mutation { addWork(title: "HP", author: "Rowling", published: 1997, genres: ["fantasy"]) { title } }"#,
        None,
    )
    .await;
    assert_eq!(response["errors"][0]["extensions"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn a_garbage_credential_blocks_mutations_but_not_reads() {
    let app = app();
    let mutation = post(
        &app,
        r#"mutation { addWork(title: "HP", author: "Rowling", published: 1997, genres: ["fantasy"]) { title } }"#,
        Some("not-a-jwt"),
    )
    .await;
    assert_eq!(
        mutation["errors"][0]["extensions"]["code"],
        "INVALID_CREDENTIAL"
    );

    let read = post(&app, "{ workCount }", Some("not-a-jwt")).await;
    assert_eq!(read["data"]["workCount"], 0);
}

#[tokio::test]
async fn a_stale_credential_degrades_to_anonymous() {
    let app = app();
    post(
        &app,
        r#"mutation { createIdentity(handle: "first", favoriteGenre: "crime") { id } }"#,
        None,
    )
    .await;
    let login = post(
        &app,
        r#"mutation { issueCredential(handle: "first", secret: "secret") { value } }"#,
        None,
    )
    .await;
    let token = login["data"]["issueCredential"]["value"]
        .as_str()
        .unwrap()
        .to_string();

    // Replacing the identity set invalidates the issued credential's id.
    post(
        &app,
        r#"mutation { createIdentity(handle: "second", favoriteGenre: "fantasy") { id } }"#,
        None,
    )
    .await;

    let read = post(&app, "{ workCount }", Some(&token)).await;
    assert_eq!(read["data"]["workCount"], 0);
    let gated = post(&app, "{ currentIdentity { handle } }", Some(&token)).await;
    assert_eq!(
        gated["errors"][0]["extensions"]["code"],
        "UNAUTHENTICATED"
    );
}

#[tokio::test]
async fn the_playground_is_served_on_get() {
    let app = app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("GraphQL Playground"));
}
