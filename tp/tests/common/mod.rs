//! In-process fake of the planning service for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::Value;

use tripplanner::config::ServiceConfig;

pub const PARIS_KML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<kml xmlns=\"http://www.opengis.net/kml/2.2\"><Document><Folder><name>Trip Plan for Paris</name></Folder></Document></kml>\n";

/// What the fake returns from `POST /api/plan/`
#[derive(Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    Raw(StatusCode, &'static str),
    Delayed(Duration, Value),
}

/// A request the fake received
#[derive(Debug, Clone)]
pub struct Received {
    pub body: Value,
    pub content_type: Option<String>,
}

#[derive(Clone)]
struct FakeState {
    replies: Arc<Mutex<Vec<Reply>>>,
    received: Arc<Mutex<Vec<Received>>>,
}

pub struct FakeService {
    pub base_url: String,
    received: Arc<Mutex<Vec<Received>>>,
}

impl FakeService {
    /// Spawn the fake on an ephemeral loopback port; replies are served in order
    pub async fn start(replies: Vec<Reply>) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            replies: Arc::new(Mutex::new(replies.into_iter().rev().collect())),
            received: Arc::clone(&received),
        };

        let app = Router::new()
            .route("/api/plan/", post(plan))
            .route("/files/paris.kml", get(|| async { PARIS_KML }))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake service");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            received,
        }
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    pub fn config(&self) -> ServiceConfig {
        ServiceConfig {
            base_url: self.base_url.clone(),
            timeout_ms: 5_000,
        }
    }
}

async fn plan(State(state): State<FakeState>, headers: HeaderMap, body: String) -> Response {
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.received.lock().unwrap().push(Received { body, content_type });

    let reply = state.replies.lock().unwrap().pop();
    match reply {
        Some(Reply::Json(status, value)) => (status, axum::Json(value)).into_response(),
        Some(Reply::Raw(status, text)) => (status, text).into_response(),
        Some(Reply::Delayed(delay, value)) => {
            tokio::time::sleep(delay).await;
            axum::Json(value).into_response()
        }
        None => (StatusCode::SERVICE_UNAVAILABLE, "no reply configured").into_response(),
    }
}

pub fn paris_reply() -> Reply {
    Reply::Json(
        StatusCode::OK,
        serde_json::json!({
            "itinerary": [{ "name": "Eiffel Tower", "lat": 48.858370, "lng": 2.294481 }],
            "kml_path": "/files/paris.kml"
        }),
    )
}
