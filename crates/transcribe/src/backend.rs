pub(crate) mod whisper;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use hark_config::{BackendConfig, BackendType};
use serde_json::Value;

use crate::schema::{JobInput, TranscriptionFormat};

/// Trait for speech-to-text backend implementations
///
/// The backend is built once at process start and shared across jobs;
/// implementations must be safe for concurrent use.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file at `audio` with the given decoding parameters
    async fn transcribe(&self, audio: &Path, options: &TranscribeOptions) -> crate::error::Result<Value>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Full decoding parameter set handed to the backend
#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    pub model: String,
    pub transcription: TranscriptionFormat,
    pub translate: bool,
    pub language: Option<String>,
    pub temperature: f64,
    pub best_of: i64,
    pub beam_size: i64,
    pub patience: f64,
    pub length_penalty: f64,
    pub suppress_tokens: String,
    pub initial_prompt: Option<String>,
    pub condition_on_previous_text: bool,
    pub temperature_increment_on_fallback: f64,
    pub compression_ratio_threshold: f64,
    pub logprob_threshold: f64,
    pub no_speech_threshold: f64,
}

impl From<&JobInput> for TranscribeOptions {
    fn from(input: &JobInput) -> Self {
        Self {
            model: input.model.clone(),
            transcription: input.transcription,
            translate: input.translate,
            language: input.language.clone(),
            temperature: input.temperature,
            best_of: input.best_of,
            beam_size: input.beam_size,
            patience: input.patience,
            length_penalty: input.length_penalty,
            suppress_tokens: input.suppress_tokens.clone(),
            initial_prompt: input.initial_prompt.clone(),
            condition_on_previous_text: input.condition_on_previous_text,
            temperature_increment_on_fallback: input.temperature_increment_on_fallback,
            compression_ratio_threshold: input.compression_ratio_threshold,
            logprob_threshold: input.logprob_threshold,
            no_speech_threshold: input.no_speech_threshold,
        }
    }
}

/// Build the configured backend
pub fn build_backend(config: &BackendConfig) -> Arc<dyn Transcriber> {
    match config.backend_type {
        BackendType::Whisper => {
            tracing::debug!("initializing whisper backend");
            Arc::new(whisper::WhisperBackend::new(config.api_key.clone(), config.base_url.clone()))
        }
    }
}
