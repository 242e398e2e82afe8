//! In-process stand-in for the Safe Browsing `threatMatches:find` endpoint.
//!
//! Serves one canned response (optionally after a delay) and records every
//! request's method, `key` query parameter and JSON body.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

pub const PATH: &str = "/v4/threatMatches:find";

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
    pub location: Option<String>,
}

impl MockResponse {
    pub fn ok(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            delay: None,
            location: None,
        }
    }

    pub fn status(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
            location: None,
        }
    }

    /// A bodyless `302 Found` pointing at `location`.
    pub fn redirect(location: &str) -> Self {
        Self {
            status: StatusCode::FOUND,
            body: String::new(),
            delay: None,
            location: Some(location.to_string()),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub key: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct MockState {
    response: MockResponse,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct MockServer {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockServer {
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts the mock on an ephemeral port; it lives until the test runtime stops.
pub async fn start(response: MockResponse) -> MockServer {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        response,
        requests: Arc::clone(&requests),
    };
    let router = Router::new()
        .route(PATH, post(find_threat_matches).get(find_threat_matches))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockServer {
        endpoint: format!("http://{addr}{PATH}"),
        requests,
    }
}

/// An endpoint on a port nothing listens on.
pub fn unreachable_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}{PATH}")
}

async fn find_threat_matches(
    State(state): State<MockState>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Response {
    let body = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    state.requests.lock().unwrap().push(CapturedRequest {
        method: method.to_string(),
        key: query.get("key").cloned(),
        body,
    });

    if let Some(delay) = state.response.delay {
        tokio::time::sleep(delay).await;
    }
    let mut response = (state.response.status, state.response.body.clone()).into_response();
    if let Some(location) = &state.response.location {
        response
            .headers_mut()
            .insert(LOCATION, HeaderValue::from_str(location).unwrap());
    }
    response
}
