//! Shared fixtures for the end-to-end tests
#![allow(dead_code)]

pub mod mock_whisper;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use transcribe::{Result, TranscribeError, TranscribeOptions, Transcriber};

/// Backend double that records every call it receives
pub struct RecordingTranscriber {
    calls: Mutex<Vec<RecordedCall>>,
    fail: bool,
}

/// One observed backend invocation, captured while the staged audio
/// still existed
#[derive(Clone)]
pub struct RecordedCall {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub options: TranscribeOptions,
}

impl RecordingTranscriber {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    /// A recording backend whose transcribe call always errors
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transcriber for RecordingTranscriber {
    async fn transcribe(&self, audio: &Path, options: &TranscribeOptions) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: audio.to_path_buf(),
            bytes: std::fs::read(audio).unwrap(),
            options: options.clone(),
        });

        if self.fail {
            return Err(TranscribeError::Connection("backend unavailable".to_string()));
        }

        Ok(json!({ "text": "hello world" }))
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Tiny file host serving one audio clip at `/clip.wav`
pub struct FileHost {
    addr: SocketAddr,
    shutdown: CancellationToken,
}

impl FileHost {
    pub async fn start(bytes: Vec<u8>) -> anyhow::Result<Self> {
        let app = Router::new().route("/clip.wav", routing::get(move || async move { bytes.clone() }));

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

        Ok(Self { addr, shutdown })
    }

    pub fn url(&self) -> String {
        format!("http://{}/clip.wav", self.addr)
    }
}

impl Drop for FileHost {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// A valid job input using an inline base64 payload
pub fn base64_job_input(payload: &[u8]) -> Value {
    use base64::Engine as _;

    json!({
        "audio_base64": base64::engine::general_purpose::STANDARD.encode(payload),
        "temperature": 0.0,
        "patience": 1.0,
        "length_penalty": 1.0,
        "temperature_increment_on_fallback": 0.2,
        "compression_ratio_threshold": 2.4,
        "logprob_threshold": -1.0,
        "no_speech_threshold": 0.6,
    })
}

/// A valid job input referencing a remote audio URL
pub fn url_job_input(url: &str) -> Value {
    json!({
        "audio": url,
        "temperature": 0.0,
        "patience": 1.0,
        "length_penalty": 1.0,
        "temperature_increment_on_fallback": 0.2,
        "compression_ratio_threshold": 2.4,
        "logprob_threshold": -1.0,
        "no_speech_threshold": 0.6,
    })
}
