//! Test doubles for the remote analysis service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::Value;
use tokio::net::TcpListener;

use super::{AnalysisBackend, AnalysisError, AnalysisRequest, AnalysisResponse};

/// A request as the mock service saw it.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub body: Value,
}

struct MockState {
    status: StatusCode,
    reply: Value,
    captured: Mutex<Vec<CapturedRequest>>,
}

/// In-process HTTP stand-in for the CoAI analyze endpoint.
pub struct MockCoaiService {
    pub url: String,
    state: Arc<MockState>,
}

impl MockCoaiService {
    /// Serve `reply` with `status` on a random loopback port.
    pub async fn start(status: StatusCode, reply: Value) -> Self {
        let state = Arc::new(MockState {
            status,
            reply,
            captured: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/mcp/analyze", post(analyze))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("http://{}/api/mcp/analyze", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.captured.lock().unwrap().clone()
    }
}

async fn analyze(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state
        .captured
        .lock()
        .unwrap()
        .push(CapturedRequest { headers, body });
    (state.status, Json(state.reply.clone()))
}

/// A loopback URL nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api/mcp/analyze", addr)
}

/// Canned outcome for [`RecordingBackend`].
#[derive(Debug, Clone)]
pub enum Reply {
    Result(Value),
    Rejected(u16, &'static str),
    Unreachable,
}

/// Backend that records every request and answers with a fixed reply.
pub struct RecordingBackend {
    reply: Reply,
    requests: Mutex<Vec<AnalysisRequest>>,
}

impl RecordingBackend {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisBackend for RecordingBackend {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Result(result) => Ok(AnalysisResponse {
                result: result.clone(),
            }),
            Reply::Rejected(status, message) => Err(AnalysisError::Rejected {
                status: *status,
                message: message.to_string(),
            }),
            Reply::Unreachable => Err(AnalysisError::Transport(
                "error sending request: Connection refused".to_string(),
            )),
        }
    }
}
