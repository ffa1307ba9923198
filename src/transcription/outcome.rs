//! Adapter invocation outcomes.
//!
//! Every provider adapter resolves to either a [`Transcript`] or a
//! [`ProviderFailure`]. Failures are ordinary values, not propagated faults:
//! the orchestrator inspects them, logs them, and moves on to the next
//! provider. No failure here is fatal to an orchestration run.

use serde::Serialize;

/// Classifies why a single provider invocation failed.
///
/// All variants are recoverable from the orchestrator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The artifact exceeds the provider's size limit; no call was made.
    SizeExceeded,
    /// No API key is configured for the provider; no call was made.
    MissingCredential,
    /// The raw-bytes upload phase failed.
    UploadError,
    /// The job submission phase failed or returned no job identifier.
    SubmissionError,
    /// Network-level or HTTP-level failure of a provider call.
    TransportError,
    /// The provider responded, but the response lacks the expected fields.
    MalformedResponse,
    /// The provider succeeded but produced an empty transcript.
    EmptyResult,
    /// The provider's job reached its terminal `error` state.
    RemoteReportedError,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureKind::SizeExceeded => "size exceeded",
            FailureKind::MissingCredential => "missing credential",
            FailureKind::UploadError => "upload error",
            FailureKind::SubmissionError => "submission error",
            FailureKind::TransportError => "transport error",
            FailureKind::MalformedResponse => "malformed response",
            FailureKind::EmptyResult => "empty result",
            FailureKind::RemoteReportedError => "remote reported error",
        };
        write!(f, "{name}")
    }
}

/// A single provider invocation failure: what class of failure, plus detail
/// suitable for logs.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {detail}")]
pub struct ProviderFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl ProviderFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// One speaker-attributed span of a diarized transcript, in original
/// utterance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerSegment {
    pub speaker: String,
    pub text: String,
}

/// A successful transcription from one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Final rendered text. For diarized output this is the speaker-tagged
    /// rendering; otherwise the provider's plain transcript, trimmed.
    pub text: String,
    /// Structured speaker segments when diarization was requested and the
    /// provider returned utterance-level data.
    pub speakers: Option<Vec<SpeakerSegment>>,
}

impl Transcript {
    /// Plain transcript with no speaker separation.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speakers: None,
        }
    }

    /// Diarized transcript rendered as `Speaker {id}: {text}` lines joined
    /// with blank-line separators, keeping utterance order.
    pub fn from_segments(segments: Vec<SpeakerSegment>) -> Self {
        let text = segments
            .iter()
            .map(|s| format!("Speaker {}: {}", s.speaker, s.text))
            .collect::<Vec<_>>()
            .join("\n\n");
        Self {
            text,
            speakers: Some(segments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_render_speaker_tagged_lines() {
        let transcript = Transcript::from_segments(vec![
            SpeakerSegment {
                speaker: "A".to_string(),
                text: "hi".to_string(),
            },
            SpeakerSegment {
                speaker: "B".to_string(),
                text: "bye".to_string(),
            },
        ]);
        assert_eq!(transcript.text, "Speaker A: hi\n\nSpeaker B: bye");
        assert_eq!(transcript.speakers.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn failure_display_includes_kind_and_detail() {
        let failure = ProviderFailure::new(FailureKind::TransportError, "connection refused");
        assert_eq!(failure.to_string(), "transport error: connection refused");
    }
}
