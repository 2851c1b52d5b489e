//! Mock OpenAI-compatible Whisper server

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// In-process inference server returning canned transcriptions
pub struct MockWhisper {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<WhisperState>,
}

struct WhisperState {
    requests: Mutex<Vec<ReceivedRequest>>,
    status: StatusCode,
    body: String,
}

/// One multipart request as the mock server saw it
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub path: String,
    pub fields: HashMap<String, String>,
    pub file: Vec<u8>,
}

impl MockWhisper {
    /// Start a mock that answers with a canned JSON transcription
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(StatusCode::OK, r#"{"text":"hello world"}"#).await
    }

    /// Start a mock with a custom status and body
    pub async fn start_with(status: StatusCode, body: &str) -> anyhow::Result<Self> {
        let state = Arc::new(WhisperState {
            requests: Mutex::new(Vec::new()),
            status,
            body: body.to_string(),
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_audio))
            .route("/v1/audio/translations", routing::post(handle_audio))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL including the `/v1` prefix, matching backend config
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockWhisper {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_audio(State(state): State<Arc<WhisperState>>, uri: Uri, mut multipart: Multipart) -> impl IntoResponse {
    let mut fields = HashMap::new();
    let mut file = Vec::new();

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            file = field.bytes().await.unwrap().to_vec();
        } else {
            fields.insert(name, field.text().await.unwrap());
        }
    }

    state.requests.lock().unwrap().push(ReceivedRequest {
        path: uri.path().to_string(),
        fields,
        file,
    });

    (state.status, state.body.clone())
}
