#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use barcelona_guide::error::CompletionError;
use barcelona_guide::routes::create_router;
use barcelona_guide::services::completion::Completer;
use barcelona_guide::state::AppState;
use tokio::sync::Notify;

/// Completer double: counts calls, optionally fails or waits to be released.
#[derive(Default)]
pub struct StubCompleter {
    pub calls: AtomicUsize,
    pub fail: bool,
    pub gate: Option<Arc<Notify>>,
}

impl StubCompleter {
    pub fn answering() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { fail: true, ..Self::default() })
    }

    pub fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self { gate: Some(gate), ..Self::default() })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Completer for StubCompleter {
    async fn complete(&self, query: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(CompletionError::api("Incorrect API key provided"));
        }
        Ok(format!("Guide says: {query}"))
    }
}

pub fn app(completer: Arc<StubCompleter>) -> Router {
    let state = Arc::new(AppState::new(Duration::from_secs(60), completer));
    create_router().with_state(state)
}

pub fn chat_request(message: &str, session_id: Option<&str>) -> Request<Body> {
    let body = serde_json::json!({ "message": message, "session_id": session_id });
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn navigate_request(session_id: &str, mode: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(format!("/sessions/{session_id}/mode"))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "mode": mode }).to_string()))
        .unwrap()
}

pub async fn json_body<T: serde::de::DeserializeOwned>(response: Response<Body>) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}
