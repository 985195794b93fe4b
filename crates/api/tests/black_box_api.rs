use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use siteboard_api::app::{build_app, services::AppServices};
use siteboard_api::config::ServerConfig;

const NIL_UUID: &str = "00000000-0000-0000-0000-000000000000";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with(ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            docs_enabled: true,
        })
        .await
    }

    async fn spawn_with(config: ServerConfig) -> Self {
        // Build the same router as prod, but bind to an ephemeral port.
        let services = Arc::new(AppServices::in_memory());
        let app = build_app(&config, services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_user(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
    email: &str,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/api/users", base_url))
        .json(&json!({ "name": name, "email": email }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn create_comment(
    client: &reqwest::Client,
    base_url: &str,
    user_id: &str,
    body: &str,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/api/comments", base_url))
        .json(&json!({ "user_id": user_id, "body": body }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn echo_returns_the_literal_hello_world_string() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/api/echo", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "\"hello world!\"");
}

#[tokio::test]
async fn user_crud_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Create
    let created = create_user(&client, &srv.base_url, "Ada", "ada@example.com").await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Ada");
    assert_eq!(created["email"], "ada@example.com");
    assert!(created["created_at"].is_string());

    // Get
    let res = client
        .get(format!("{}/api/users/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["id"], id.as_str());

    // List
    let res = client
        .get(format!("{}/api/users", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(listed["items"].as_array().unwrap().len(), 1);

    // Update
    let res = client
        .patch(format!("{}/api/users/{}", srv.base_url, id))
        .json(&json!({ "name": "Augusta Ada King" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["name"], "Augusta Ada King");
    assert_eq!(updated["email"], "ada@example.com");

    // Delete
    let res = client
        .delete(format!("{}/api/users/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/users/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_validation_failures_map_to_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/users", srv.base_url))
        .json(&json!({ "name": "   ", "email": "ada@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = client
        .post(format!("{}/api/users", srv.base_url))
        .json(&json!({ "name": "Ada", "email": "not-an-email" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_user_id_is_rejected_and_unknown_id_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/users/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");

    let res = client
        .get(format!("{}/api/users/{}", srv.base_url, NIL_UUID))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comment_lifecycle_with_user_filter() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let ada = create_user(&client, &srv.base_url, "Ada", "ada@example.com").await;
    let ada_id = ada["id"].as_str().unwrap().to_string();
    let bob = create_user(&client, &srv.base_url, "Bob", "bob@example.com").await;
    let bob_id = bob["id"].as_str().unwrap().to_string();

    let first = create_comment(&client, &srv.base_url, &ada_id, "first!").await;
    create_comment(&client, &srv.base_url, &ada_id, "second").await;
    create_comment(&client, &srv.base_url, &bob_id, "hello from bob").await;

    // Full listing
    let res = client
        .get(format!("{}/api/comments", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(listed["items"].as_array().unwrap().len(), 3);

    // Filtered by author
    let res = client
        .get(format!("{}/api/comments?user_id={}", srv.base_url, ada_id))
        .send()
        .await
        .unwrap();
    let listed: serde_json::Value = res.json().await.unwrap();
    let items = listed["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|c| c["user_id"] == ada_id.as_str()));

    // Get one
    let comment_id = first["id"].as_str().unwrap();
    let res = client
        .get(format!("{}/api/comments/{}", srv.base_url, comment_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["body"], "first!");

    // Delete one
    let res = client
        .delete(format!("{}/api/comments/{}", srv.base_url, comment_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/comments/{}", srv.base_url, comment_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comment_for_unknown_user_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/comments", srv.base_url))
        .json(&json!({ "user_id": NIL_UUID, "body": "orphan" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_user_cascades_their_comments() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let ada = create_user(&client, &srv.base_url, "Ada", "ada@example.com").await;
    let ada_id = ada["id"].as_str().unwrap().to_string();
    create_comment(&client, &srv.base_url, &ada_id, "one").await;
    create_comment(&client, &srv.base_url, &ada_id, "two").await;

    let res = client
        .delete(format!("{}/api/users/{}", srv.base_url, ada_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/comments", srv.base_url))
        .send()
        .await
        .unwrap();
    let listed: serde_json::Value = res.json().await.unwrap();
    assert!(listed["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn docs_document_carries_static_metadata_and_configured_host() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for path in ["/api/docs", "/api/docs/openapi.json"] {
        let res = client
            .get(format!("{}{}", srv.base_url, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let doc: serde_json::Value = res.json().await.unwrap();
        assert_eq!(doc["info"]["title"], "siteboard API");
        assert_eq!(doc["info"]["version"], "1.0");
        assert_eq!(doc["servers"][0]["url"], "http://127.0.0.1:0");
        assert!(doc["paths"]["/api/echo"].is_object());
        assert!(doc["paths"]["/api/users"].is_object());
        assert!(doc["paths"]["/api/comments"].is_object());
    }
}

#[tokio::test]
async fn docs_routes_are_absent_when_disabled() {
    let srv = TestServer::spawn_with(ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        docs_enabled: false,
    })
    .await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/docs", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The rest of the API is unaffected.
    let res = client
        .get(format!("{}/api/echo", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_api_routes_fall_through_to_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/nope", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
