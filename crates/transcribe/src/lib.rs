#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod audio;
mod backend;
mod error;
mod handler;
mod http_client;
mod job;
mod schema;

pub use backend::{TranscribeOptions, Transcriber, build_backend};
pub use error::{Result, TranscribeError};
pub use handler::Handler;
pub use job::Job;
pub use schema::{AudioSource, JobInput, TranscriptionFormat};
