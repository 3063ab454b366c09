//! In-process stand-in for the notary backend
//!
//! Serves `POST /api/upload` and `POST /api/verify` on an ephemeral port,
//! answers every request with one canned status/body, and keeps a copy of
//! each request for inspection.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

/// One request as the backend received it
#[derive(Debug, Clone)]
pub struct Captured {
    pub path: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Captured {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone)]
struct BackendState {
    status: StatusCode,
    body: &'static str,
    captured: Arc<Mutex<Vec<Captured>>>,
}

pub struct FakeBackend {
    pub base_url: String,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl FakeBackend {
    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<BackendState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.captured.lock().unwrap().push(Captured {
        path: uri.path().to_string(),
        content_type,
        body: body.to_vec(),
    });
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
        .into_response()
}

/// Start a backend answering every request with `status` and `body`
pub async fn spawn_backend(status: StatusCode, body: &'static str) -> FakeBackend {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = BackendState {
        status,
        body,
        captured: Arc::clone(&captured),
    };
    let app = Router::new()
        .route("/api/upload", post(record))
        .route("/api/verify", post(record))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind ephemeral port");
    let addr = listener.local_addr().expect("Should have local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake backend failed");
    });

    FakeBackend {
        base_url: format!("http://{}", addr),
        captured,
    }
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind ephemeral port");
    let addr = listener.local_addr().expect("Should have local address");
    drop(listener);
    format!("http://{}", addr)
}
