use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::error::TranscribeError;
use crate::http_client::http_client;
use crate::schema::TranscriptionFormat;

use super::{TranscribeOptions, Transcriber};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/v1";

/// `OpenAI`-compatible Whisper inference server backend
pub(crate) struct WhisperBackend {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl WhisperBackend {
    pub fn new(api_key: Option<SecretString>, base_url: Option<String>) -> Self {
        let client = http_client();
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            client,
            base_url,
            api_key,
        }
    }
}

/// Map the job-level output format onto the wire `response_format` field
fn response_format(format: TranscriptionFormat) -> &'static str {
    match format {
        TranscriptionFormat::PlainText => "text",
        TranscriptionFormat::FormattedText => "json",
        TranscriptionFormat::Srt => "srt",
        TranscriptionFormat::Vtt => "vtt",
    }
}

#[async_trait]
impl Transcriber for WhisperBackend {
    async fn transcribe(&self, audio: &Path, options: &TranscribeOptions) -> crate::error::Result<Value> {
        // Translation uses a sibling endpoint in the OpenAI audio API
        let endpoint = if options.translate { "translations" } else { "transcriptions" };
        let url = format!("{}/audio/{endpoint}", self.base_url);

        let bytes = tokio::fs::read(audio).await?;
        let filename = audio
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("audio.wav")
            .to_string();

        tracing::debug!("whisper request: {} bytes, model={}", bytes.len(), options.model);

        let mut form = reqwest::multipart::Form::new()
            .part("file", reqwest::multipart::Part::bytes(bytes).file_name(filename))
            .text("model", options.model.clone())
            .text("response_format", response_format(options.transcription))
            .text("temperature", options.temperature.to_string())
            .text("best_of", options.best_of.to_string())
            .text("beam_size", options.beam_size.to_string())
            .text("patience", options.patience.to_string())
            .text("length_penalty", options.length_penalty.to_string())
            .text("suppress_tokens", options.suppress_tokens.clone())
            .text(
                "condition_on_previous_text",
                options.condition_on_previous_text.to_string(),
            )
            .text(
                "temperature_increment_on_fallback",
                options.temperature_increment_on_fallback.to_string(),
            )
            .text(
                "compression_ratio_threshold",
                options.compression_ratio_threshold.to_string(),
            )
            .text("logprob_threshold", options.logprob_threshold.to_string())
            .text("no_speech_threshold", options.no_speech_threshold.to_string());

        if let Some(language) = &options.language {
            form = form.text("language", language.clone());
        }

        if let Some(prompt) = &options.initial_prompt {
            form = form.text("initial_prompt", prompt.clone());
        }

        let mut request = self.client.post(&url).multipart(form);

        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key.expose_secret()));
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("whisper request failed: {e}");
            TranscribeError::Connection(format!("failed to send request to whisper backend: {e}"))
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "unknown error".to_string());

            tracing::error!("whisper API error ({status}): {error_text}");

            return Err(match status.as_u16() {
                401 => TranscribeError::AuthenticationFailed(error_text),
                400 => TranscribeError::InvalidRequest(error_text),
                _ => TranscribeError::BackendApi {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TranscribeError::Connection(format!("failed to read whisper response: {e}")))?;

        // Only the json format comes back as a structure; text, srt and
        // vtt responses are raw text and get wrapped for the queue
        let result = match options.transcription {
            TranscriptionFormat::FormattedText => serde_json::from_str(&body)
                .map_err(|e| TranscribeError::InvalidResponse(format!("whisper returned malformed JSON: {e}")))?,
            _ => serde_json::json!({ "transcription": body }),
        };

        tracing::debug!("whisper transcription complete");

        Ok(result)
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
