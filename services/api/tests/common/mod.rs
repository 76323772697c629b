use api_lib::config::Config;
use api_lib::web::{self, state::AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use textbook_scan_core::InMemoryDatabase;
use tower::ServiceExt;

pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";

/// The full router backed by a fresh in-memory store.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn spawn() -> Self {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("memory".to_string()),
            _ => None,
        })
        .expect("Failed to build test configuration");

        let state = Arc::new(AppState {
            db: Arc::new(InMemoryDatabase::new()),
            config: Arc::new(config),
        });
        let router = web::router(state).expect("Failed to build router");
        TestApp { router }
    }

    /// Invokes `POST /rpc/<operation>` as `user` and returns the status and JSON body.
    pub async fn call(&self, operation: &str, user: Option<&str>, input: Value) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method("POST")
            .uri(format!("/rpc/{operation}"))
            .header("content-type", "application/json");
        if let Some(user) = user {
            request = request.header("x-user-id", user);
        }
        let request = request
            .body(Body::from(input.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }
}
