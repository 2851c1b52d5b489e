use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranscribeError>;

/// Errors surfaced by audio staging and the transcription backend
///
/// Validation failures never appear here; the handler recovers those
/// locally as `{"error": …}` payloads.
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// Fetching the remote audio failed
    #[error("audio download failed: {0}")]
    Download(String),

    /// The inline audio payload was not valid base64
    #[error("invalid base64 audio payload: {0}")]
    AudioDecode(#[from] base64::DecodeError),

    /// Filesystem error while staging audio
    #[error("audio staging failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backend could not be reached
    #[error("backend connection error: {0}")]
    Connection(String),

    #[error("backend authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The backend replied with something the worker cannot interpret
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),

    /// Non-success response from the backend API
    #[error("backend API error ({status}): {message}")]
    BackendApi { status: u16, message: String },
}
