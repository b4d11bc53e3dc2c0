//! End-to-end tests for registration and login.

mod common;

use common::{TestClient, TestServer, TEST_EMAIL, TEST_PASS};
use reqwest::StatusCode;

#[tokio::test]
async fn register_with_valid_credentials() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.register("new.user@example.com", "password123").await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "new.user@example.com");
}

#[tokio::test]
async fn register_persists_the_user() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    client.register("persisted@example.com", "password123").await;

    let record = server
        .user_store
        .get_user_by_email("persisted@example.com")
        .unwrap();
    assert!(record.is_some());
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    // the test user is pre-seeded
    let response = client.register(TEST_EMAIL, "another-password").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    for email in ["not-an-email", "user@nodot", "user at example.com", ""] {
        let response = client.register(email, "password123").await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "accepted invalid email {:?}",
            email
        );
    }
}

#[tokio::test]
async fn register_rejects_short_password() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.register("short@example.com", "12345").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_valid_credentials() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login(TEST_EMAIL, TEST_PASS).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], TEST_EMAIL);
}

#[tokio::test]
async fn login_with_invalid_password() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login(TEST_EMAIL, "wrong_password").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_nonexistent_user() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login("nobody@example.com", "password123").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registered_token_authenticates_generation() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.register("gen.user@example.com", "password123").await;
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let client = TestClient::new(server.base_url.clone()).with_token(token);
    let response = client.generate("my first title", "youtube").await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn generation_requires_authentication() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.generate("my title", "x").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone()).with_token("not-a-real-token");

    let response = client.generate("my title", "x").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn home_reports_server_stats() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.home().await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["uptime"].as_str().is_some());
    assert!(body["version"].as_str().is_some());
}
