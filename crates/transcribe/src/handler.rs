use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Value, json};

use crate::audio;
use crate::backend::{TranscribeOptions, Transcriber};
use crate::error::Result;
use crate::job::Job;
use crate::schema::JobInput;

/// Per-process job handler holding the shared backend
pub struct Handler {
    transcriber: Arc<dyn Transcriber>,
    workdir: PathBuf,
}

impl Handler {
    pub fn new(transcriber: Arc<dyn Transcriber>, workdir: PathBuf) -> Self {
        Self { transcriber, workdir }
    }

    /// Run one job to completion
    ///
    /// Validation and audio-source invariant failures come back as `Ok`
    /// payloads with a single `error` field; no download or decode has
    /// happened at that point. Download, decode and backend failures
    /// propagate as `Err` and are reported by the worker loop as job
    /// failures. Staged audio is removed on both paths.
    pub async fn handle(&self, job: &Job) -> Result<Value> {
        let input: JobInput = match serde_json::from_value(job.input.clone()) {
            Ok(input) => input,
            Err(e) => {
                tracing::debug!(job_id = %job.id, "input validation failed: {e}");
                return Ok(json!({ "error": e.to_string() }));
            }
        };

        let source = match input.audio_source() {
            Ok(source) => source,
            Err(message) => {
                tracing::debug!(job_id = %job.id, "rejected: {message}");
                return Ok(json!({ "error": message }));
            }
        };

        let staged = audio::resolve(&source, &job.id, &self.workdir).await?;

        let options = TranscribeOptions::from(&input);
        let result = self.transcriber.transcribe(staged.path(), &options).await?;

        Ok(result)
    }
}
