#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Queue adapter hosting the job handler
//!
//! Polls the serverless job queue for work and reports each job's
//! outcome back. The queue service itself stays external; this crate
//! only speaks its take/done protocol.

use std::time::Duration;

use hark_config::QueueConfig;
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use transcribe::{Handler, Job};

/// Worker that polls the job queue and dispatches jobs to the handler
pub struct Worker {
    client: reqwest::Client,
    config: QueueConfig,
    handler: Handler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobStatus {
    Completed,
    Failed,
}

impl JobStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl Worker {
    pub fn new(config: QueueConfig, handler: Handler) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            handler,
        }
    }

    /// Poll for jobs until the shutdown token fires
    ///
    /// A job already in flight finishes and is reported before the
    /// loop exits.
    pub async fn run(&self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);

        tracing::info!(worker_id = %self.config.worker_id, "worker started");

        loop {
            let taken = tokio::select! {
                () = shutdown.cancelled() => break,
                taken = self.take_job() => taken,
            };

            match taken {
                Ok(Some(job)) => self.process(job).await,
                Ok(None) => tokio::time::sleep(poll_interval).await,
                Err(e) => {
                    tracing::warn!("job-take failed: {e}");
                    tokio::time::sleep(poll_interval).await;
                }
            }
        }

        tracing::info!("worker stopped");
        Ok(())
    }

    /// Take one job from the queue, if any is waiting
    async fn take_job(&self) -> anyhow::Result<Option<Job>> {
        let url = format!("{}/job-take/{}", self.config.base_url, self.config.worker_id);

        let response = self.authorized(self.client.get(&url)).send().await?;

        match response.status() {
            reqwest::StatusCode::NO_CONTENT | reqwest::StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => anyhow::bail!("job-take returned {status}"),
        }
    }

    async fn process(&self, job: Job) {
        tracing::info!(job_id = %job.id, "processing job");

        let (output, status) = match self.handler.handle(&job).await {
            Ok(output) => (output, JobStatus::Completed),
            Err(e) => {
                tracing::error!(job_id = %job.id, "job failed: {e}");
                (json!({ "error": e.to_string() }), JobStatus::Failed)
            }
        };

        if let Err(e) = self.report(&job.id, &output, status).await {
            tracing::error!(job_id = %job.id, "failed to report job result: {e}");
        }
    }

    /// Post the job outcome back to the queue
    async fn report(&self, job_id: &str, output: &Value, status: JobStatus) -> anyhow::Result<()> {
        let url = format!(
            "{}/job-done/{}/{job_id}?status={}",
            self.config.base_url,
            self.config.worker_id,
            status.as_str()
        );

        let response = self.authorized(self.client.post(&url)).json(output).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("job-done returned {}", response.status());
        }

        Ok(())
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key.expose_secret())),
            None => request,
        }
    }
}
