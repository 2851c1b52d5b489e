use serde::Deserialize;
use serde_json::Value;

/// One unit of work taken from the job queue
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Queue-assigned unique identifier
    pub id: String,
    /// Raw input mapping, validated by the handler
    pub input: Value,
}
