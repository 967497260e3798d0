//! Common test utilities for in-process API testing.
//!
//! The fixture builds the full router around a fresh in-memory store, so
//! every test starts from its own copy of the starter tickets.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::broadcast;
use tower::ServiceExt;

use helpdesk_core::{Config, MemoryTicketStore, RatingPolicy, TicketStore};
use helpdesk_server::api::{create_router, WsBroadcaster, WsMessage};
use helpdesk_server::state::AppState;

/// Test fixture wrapping the router and the store behind it.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_ticket_creation() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/v1/tickets", json!({
///         "title": "Databases",
///         "description": "Intro to SQL"
///     })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// The store the router reads and writes
    pub store: Arc<MemoryTicketStore>,
    /// Broadcaster the handlers publish changes to
    pub broadcaster: WsBroadcaster,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture over the seeded store.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let store = if test_config.seed {
            MemoryTicketStore::seeded()
        } else {
            MemoryTicketStore::new()
        };
        let store = Arc::new(store.with_rating_policy(test_config.rating_policy));

        let broadcaster = WsBroadcaster::new(64);
        let state = Arc::new(AppState::new(
            Config::default(),
            Arc::clone(&store) as Arc<dyn TicketStore>,
            broadcaster.clone(),
        ));

        Self {
            router: create_router(state),
            store,
            broadcaster,
        }
    }

    /// Subscribe to the change feed the handlers publish on.
    pub fn subscribe(&self) -> broadcast::Receiver<WsMessage> {
        self.broadcaster.subscribe()
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a DELETE request with JSON body.
    pub async fn delete_with_body(&self, path: &str, body: Value) -> TestResponse {
        self.request("DELETE", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.request_raw("POST", path, body, "application/json").await
    }

    /// Send a request with raw string body and custom content type.
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: &str,
        content_type: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Fetch a non-JSON body, e.g. the metrics page.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Start from the three starter tickets
    pub seed: bool,
    /// Rating gate applied by the store
    pub rating_policy: RatingPolicy,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            seed: true,
            rating_policy: RatingPolicy::CompletedOnly,
        }
    }
}

impl TestConfig {
    /// Create config with an empty store.
    pub fn empty() -> Self {
        Self {
            seed: false,
            ..Default::default()
        }
    }

    /// Create config that accepts ratings in any status.
    pub fn rate_any_status() -> Self {
        Self {
            rating_policy: RatingPolicy::AnyStatus,
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
