//! Fake vocabulary registry for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1 and serves `GET /rest/v1/{voc_id}/data?uri=<uri>`:
//! - registered documents as 200 JSON
//! - registered raw bodies verbatim (for malformed JSON)
//! - a configured status for failing URIs, or for everything while "down"
//! - 404 for anything else
//!
//! Every request is recorded so tests can count round trips.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request as seen by the server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub voc_id: String,
    pub uri: Option<String>,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Default)]
struct RegistryState {
    documents: HashMap<String, Value>,
    raw_bodies: HashMap<String, String>,
    failures: HashMap<String, StatusCode>,
    down: Option<StatusCode>,
    requests: Vec<RecordedRequest>,
}

/// Handle to the running fake registry.
pub struct FakeRegistry {
    addr: SocketAddr,
    state: Arc<Mutex<RegistryState>>,
}

impl FakeRegistry {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(RegistryState::default()));

        let app = Router::new()
            .route("/rest/v1/:voc_id/data", get(vocab_data))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    /// API root to hand to `VocabConfig::with_api_root`.
    pub fn api_root(&self) -> String {
        format!("http://{}/rest/v1", self.addr)
    }

    pub async fn add_document(&self, uri: &str, document: Value) {
        self.state
            .lock()
            .await
            .documents
            .insert(uri.to_string(), document);
    }

    /// Serve `body` with status 200 without validating it.
    pub async fn add_raw(&self, uri: &str, body: &str) {
        self.state
            .lock()
            .await
            .raw_bodies
            .insert(uri.to_string(), body.to_string());
    }

    pub async fn fail_uri(&self, uri: &str, status: StatusCode) {
        self.state
            .lock()
            .await
            .failures
            .insert(uri.to_string(), status);
    }

    /// Answer every request with `status` until [`recover`](Self::recover).
    pub async fn go_down(&self, status: StatusCode) {
        self.state.lock().await.down = Some(status);
    }

    pub async fn recover(&self) {
        self.state.lock().await.down = None;
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }

    /// Requests made for one concept URI.
    pub async fn hits(&self, uri: &str) -> usize {
        self.state
            .lock()
            .await
            .requests
            .iter()
            .filter(|r| r.uri.as_deref() == Some(uri))
            .count()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn vocab_data(
    Path(voc_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    State(state): State<Arc<Mutex<RegistryState>>>,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let uri = params.get("uri").cloned();

    let mut state = state.lock().await;
    state.requests.push(RecordedRequest {
        voc_id,
        uri: uri.clone(),
        accept: header_value(header::ACCEPT),
        user_agent: header_value(header::USER_AGENT),
    });

    if let Some(status) = state.down {
        return status.into_response();
    }

    let Some(uri) = uri else {
        return (StatusCode::BAD_REQUEST, "missing uri parameter").into_response();
    };

    if let Some(status) = state.failures.get(&uri) {
        return (*status).into_response();
    }
    if let Some(body) = state.raw_bodies.get(&uri) {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/ld+json")],
            body.clone(),
        )
            .into_response();
    }
    match state.documents.get(&uri) {
        Some(document) => axum::Json(document.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
