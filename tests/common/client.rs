//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with methods for every server endpoint. When routes or
//! request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

/// HTTP test client carrying an optional bearer token.
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    token: Option<String>,
}

impl TestClient {
    /// Creates a new unauthenticated client.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            token: None,
        }
    }

    /// Creates a client authenticated as the pre-seeded test user.
    ///
    /// # Panics
    ///
    /// Panics if authentication fails (test infrastructure problem).
    pub async fn authenticated(base_url: String) -> Self {
        let mut client = Self::new(base_url);

        let response = client.login(TEST_EMAIL, TEST_PASS).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "Test user authentication failed"
        );
        let body: serde_json::Value = response.json().await.expect("Login body not JSON");
        let token = body["token"].as_str().expect("Login body missing token");
        client.token = Some(token.to_string());

        client
    }

    /// Use the given bearer token for subsequent requests.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    /// POST /api/auth/register
    pub async fn register(&self, email: &str, password: &str) -> Response {
        self.client
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("register request failed")
    }

    /// POST /api/auth/login
    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("login request failed")
    }

    // ========================================================================
    // Generation Endpoint
    // ========================================================================

    /// POST /api/generate
    pub async fn generate(&self, title: &str, platform: &str) -> Response {
        self.authorize(self.client.post(format!("{}/api/generate", self.base_url)))
            .json(&json!({ "title": title, "platform": platform }))
            .send()
            .await
            .expect("generate request failed")
    }

    // ========================================================================
    // Misc
    // ========================================================================

    /// GET /
    pub async fn home(&self) -> Response {
        self.authorize(self.client.get(format!("{}/", self.base_url)))
            .send()
            .await
            .expect("home request failed")
    }
}
