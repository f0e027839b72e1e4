//! Common test utilities: an in-process fake recommendation backend.
//!
//! The fake backend is a real axum server bound to an ephemeral port, so
//! the HTTP client is exercised end to end over loopback.

#![allow(dead_code)]

use std::net::TcpListener as StdTcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

/// A request received by the fake backend.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct BackendState {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Handle to a running fake backend.
pub struct TestBackend {
    pub base_url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl TestBackend {
    /// Requests received on `/search` so far.
    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

/// Builder for a fake backend's `/search` and `/health` behavior.
pub struct BackendBuilder {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
    health_status: StatusCode,
    health_body: String,
}

impl Default for BackendBuilder {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            body: r#"{"status": "success"}"#.to_string(),
            delay: None,
            health_status: StatusCode::OK,
            health_body: r#"{"status": "healthy"}"#.to_string(),
        }
    }
}

impl BackendBuilder {
    pub fn search_json(mut self, body: Value) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn search_raw(mut self, status: u16, body: &str) -> Self {
        self.status = StatusCode::from_u16(status).unwrap();
        self.body = body.to_string();
        self
    }

    pub fn search_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn health_raw(mut self, status: u16, body: &str) -> Self {
        self.health_status = StatusCode::from_u16(status).unwrap();
        self.health_body = body.to_string();
        self
    }

    pub async fn spawn(self) -> TestBackend {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            status: self.status,
            body: self.body,
            delay: self.delay,
            captured: Arc::clone(&captured),
        };
        let health_status = self.health_status;
        let health_body = self.health_body;

        let router = Router::new()
            .route("/search", post(search_handler))
            .route(
                "/health",
                get(move || async move {
                    (
                        health_status,
                        [(header::CONTENT_TYPE, "application/json")],
                        health_body,
                    )
                }),
            )
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        TestBackend {
            base_url: format!("http://{}", addr),
            captured,
        }
    }
}

async fn search_handler(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.captured.lock().unwrap().push(CapturedRequest {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

/// A loopback URL with nothing listening on it.
pub fn unreachable_base_url() -> String {
    let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
