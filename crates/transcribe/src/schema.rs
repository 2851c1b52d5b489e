use serde::Deserialize;

pub(crate) const MISSING_AUDIO: &str = "Must provide either audio or audio_base64";
pub(crate) const CONFLICTING_AUDIO: &str = "Must provide either audio or audio_base64, not both";

/// Validated job input
///
/// Optional decoding parameters carry their documented defaults. Fields
/// without a `serde(default)` are required; deserialization fails when
/// they are absent, and the handler reports that as a validation error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobInput {
    /// Remote audio URL, mutually exclusive with `audio_base64`
    #[serde(default)]
    pub audio: Option<String>,
    /// Inline base64 audio payload, mutually exclusive with `audio`
    #[serde(default)]
    pub audio_base64: Option<String>,
    /// Model variant name
    #[serde(default = "defaults::model")]
    pub model: String,
    /// Output format for the transcription text
    #[serde(default)]
    pub transcription: TranscriptionFormat,
    /// Translate to English instead of transcribing
    #[serde(default)]
    pub translate: bool,
    /// Source language hint (ISO 639-1); unset means auto-detect
    #[serde(default)]
    pub language: Option<String>,
    pub temperature: f64,
    #[serde(default = "defaults::best_of")]
    pub best_of: i64,
    #[serde(default = "defaults::beam_size")]
    pub beam_size: i64,
    pub patience: f64,
    pub length_penalty: f64,
    #[serde(default = "defaults::suppress_tokens")]
    pub suppress_tokens: String,
    #[serde(default)]
    pub initial_prompt: Option<String>,
    #[serde(default = "defaults::condition_on_previous_text")]
    pub condition_on_previous_text: bool,
    pub temperature_increment_on_fallback: f64,
    pub compression_ratio_threshold: f64,
    pub logprob_threshold: f64,
    pub no_speech_threshold: f64,
}

mod defaults {
    pub(super) fn model() -> String {
        "base".to_string()
    }

    pub(super) const fn best_of() -> i64 {
        5
    }

    pub(super) const fn beam_size() -> i64 {
        5
    }

    pub(super) fn suppress_tokens() -> String {
        "-1".to_string()
    }

    pub(super) const fn condition_on_previous_text() -> bool {
        true
    }
}

/// Output format for the transcribed text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptionFormat {
    #[default]
    PlainText,
    FormattedText,
    Srt,
    Vtt,
}

/// Audio source for one job
///
/// Constructed at the validation boundary, so downstream code never
/// sees zero or two sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    FromUrl(String),
    FromBase64(String),
}

impl JobInput {
    /// Split out the audio source, enforcing the exclusivity invariant
    pub fn audio_source(&self) -> std::result::Result<AudioSource, &'static str> {
        match (&self.audio, &self.audio_base64) {
            (Some(url), None) => Ok(AudioSource::FromUrl(url.clone())),
            (None, Some(encoded)) => Ok(AudioSource::FromBase64(encoded.clone())),
            (None, None) => Err(MISSING_AUDIO),
            (Some(_), Some(_)) => Err(CONFLICTING_AUDIO),
        }
    }
}
