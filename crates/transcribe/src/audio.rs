use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tempfile::NamedTempFile;

use crate::error::{Result, TranscribeError};
use crate::http_client::http_client;
use crate::schema::AudioSource;

/// Local audio staged for one job
///
/// Owns the artifact it points at. Dropping the guard removes it, so
/// cleanup runs on every exit path, including backend failures.
#[derive(Debug)]
pub(crate) struct ResolvedAudio {
    path: PathBuf,
    artifact: Artifact,
}

#[derive(Debug)]
enum Artifact {
    /// Job-scoped download directory, removed recursively on drop
    Downloaded(PathBuf),
    /// Decoded temp file, removed by `NamedTempFile` on drop
    Decoded(#[allow(dead_code)] NamedTempFile),
}

impl ResolvedAudio {
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ResolvedAudio {
    fn drop(&mut self) {
        if let Artifact::Downloaded(dir) = &self.artifact
            && let Err(e) = std::fs::remove_dir_all(dir)
        {
            tracing::warn!("failed to remove job artifacts at {}: {e}", dir.display());
        }
    }
}

/// Stage the job's audio source as a local file
pub(crate) async fn resolve(source: &AudioSource, job_id: &str, workdir: &Path) -> Result<ResolvedAudio> {
    match source {
        AudioSource::FromUrl(url) => download(url, job_id, workdir).await,
        AudioSource::FromBase64(encoded) => decode_base64(encoded),
    }
}

/// Download remote audio into a directory scoped by job id, so
/// concurrent jobs do not collide on shared scratch storage
async fn download(url: &str, job_id: &str, workdir: &Path) -> Result<ResolvedAudio> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|e| TranscribeError::Download(format!("failed to fetch {url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(TranscribeError::Download(format!("fetching {url} returned {status}")));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| TranscribeError::Download(format!("failed to read body of {url}: {e}")))?;

    let dir = workdir.join(job_id);
    tokio::fs::create_dir_all(&dir).await?;

    let path = dir.join(filename_from_url(url));
    tokio::fs::write(&path, &bytes).await?;

    tracing::debug!("downloaded {} bytes to {}", bytes.len(), path.display());

    Ok(ResolvedAudio {
        path,
        artifact: Artifact::Downloaded(dir),
    })
}

/// Decode an inline base64 payload into a fresh temp file
fn decode_base64(encoded: &str) -> Result<ResolvedAudio> {
    let bytes = BASE64.decode(encoded)?;

    let file = tempfile::Builder::new().prefix("hark-audio-").suffix(".wav").tempfile()?;
    std::fs::write(file.path(), &bytes)?;

    tracing::debug!("decoded {} bytes to {}", bytes.len(), file.path().display());

    Ok(ResolvedAudio {
        path: file.path().to_path_buf(),
        artifact: Artifact::Decoded(file),
    })
}

/// Pick a local filename from the last URL path segment
fn filename_from_url(url: &str) -> &str {
    url.rsplit('/')
        .next()
        .map(|segment| segment.split(['?', '#']).next().unwrap_or(""))
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .unwrap_or("audio.wav")
}
