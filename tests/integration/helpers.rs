//! Test helpers: app setup, token minting, and request utilities.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use inkpress_api::auth::Claims;
use inkpress_api::{build_app, build_state};
use inkpress_core::config::AppConfig;
use inkpress_entity::user::UserRole;

const TEST_SECRET: &str = "integration-test-secret";

/// Test application wrapper.
pub struct TestApp {
    /// The Axum router.
    pub router: Router,
}

impl TestApp {
    /// Creates a fresh app over an empty in-memory store with a root
    /// category.
    pub async fn new() -> Self {
        let state = build_state(AppConfig::in_memory(TEST_SECRET))
            .await
            .expect("Failed to build state");
        Self {
            router: build_app(state),
        }
    }

    /// Mints a valid bearer token for `username` with `role`.
    pub fn token(&self, username: &str, role: UserRole) -> String {
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: username.to_string(),
            role,
            exp: chrono::Utc::now().timestamp() + 3600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .expect("Failed to encode token")
    }

    /// Token for an editor named `editor`.
    pub fn editor(&self) -> String {
        self.token("editor", UserRole::Editor)
    }

    /// Token for an admin named `admin`.
    pub fn admin(&self) -> String {
        self.token("admin", UserRole::Admin)
    }

    /// Creates a category and asserts success.
    pub async fn create_category(&self, token: &str, parent_path: &str, directory_name: &str) {
        let response = self
            .request(
                "POST",
                "/api/categories",
                Some(serde_json::json!({
                    "parent_path": parent_path,
                    "directory_name": directory_name,
                    "name": directory_name,
                })),
                Some(token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "create category {directory_name}: {}",
            response.body
        );
    }

    /// Creates an article from a JSON body and asserts success.
    pub async fn create_article(&self, token: &str, body: Value) {
        let response = self
            .request("POST", "/api/articles", Some(body), Some(token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "create article: {}",
            response.body
        );
    }

    /// Sends a request and returns the status and parsed JSON body.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Simplified response for assertions.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
