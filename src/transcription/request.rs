//! Transcription request type.

use super::artifact::AudioArtifact;

/// One transcription job as seen by every adapter.
///
/// Immutable for the duration of an orchestration run; each provider attempt
/// reads the same request.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    /// The audio to transcribe.
    pub artifact: AudioArtifact,
    /// Whether the caller wants speaker-separated output.
    pub want_diarization: bool,
    /// Forced language code (e.g. "he"). `None` lets providers auto-detect.
    pub language_hint: Option<String>,
}

impl TranscriptionRequest {
    pub fn new(artifact: AudioArtifact) -> Self {
        Self {
            artifact,
            want_diarization: false,
            language_hint: None,
        }
    }

    pub fn with_diarization(mut self, want: bool) -> Self {
        self.want_diarization = want;
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language_hint = language;
        self
    }
}
