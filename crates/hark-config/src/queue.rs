use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;

const fn default_poll_interval_ms() -> u64 {
    250
}

/// Job queue endpoint this worker polls
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
    /// Base URL of the queue API, without a trailing slash
    pub base_url: String,
    /// Identifier this worker takes jobs under
    pub worker_id: String,
    /// Bearer token for queue requests
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Delay between empty job-take polls
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Scratch directory for per-job audio artifacts
    #[serde(default)]
    pub workdir: Option<PathBuf>,
}

impl QueueConfig {
    /// Directory downloaded audio is staged under, scoped per job id
    pub fn workdir(&self) -> PathBuf {
        self.workdir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("hark-jobs"))
    }
}
