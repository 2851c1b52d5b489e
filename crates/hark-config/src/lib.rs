#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod backend;
mod env;
mod loader;
pub mod queue;

use serde::Deserialize;

pub use backend::{BackendConfig, BackendType};
pub use queue::QueueConfig;

/// Top-level Hark configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Job queue the worker polls
    pub queue: QueueConfig,
    /// Speech-to-text backend configuration
    pub backend: BackendConfig,
}
