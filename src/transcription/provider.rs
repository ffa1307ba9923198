//! Transcription provider definitions.
//!
//! Defines the supported transcription backends and the static descriptor the
//! orchestrator uses to order providers and decide eligibility. Descriptors
//! are configuration data: built once from config plus credentials, never
//! mutated during a run.

use serde::{Deserialize, Serialize};

/// Represents a supported transcription backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    AssemblyAi,
    Whisper,
    CloudSpeech,
}

impl ProviderKind {
    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::AssemblyAi => "assemblyai",
            ProviderKind::Whisper => "whisper",
            ProviderKind::CloudSpeech => "cloudspeech",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::AssemblyAi => "AssemblyAI",
            ProviderKind::Whisper => "Whisper",
            ProviderKind::CloudSpeech => "Cloud Speech",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "assemblyai" => Some(ProviderKind::AssemblyAi),
            "whisper" => Some(ProviderKind::Whisper),
            "cloudspeech" => Some(ProviderKind::CloudSpeech),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            ProviderKind::AssemblyAi,
            ProviderKind::Whisper,
            ProviderKind::CloudSpeech,
        ]
    }
}

/// Static description of one configured provider.
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    pub kind: ProviderKind,
    /// Lower priority values are tried first. Ties keep configuration order.
    pub priority: u8,
    /// Whether this backend can produce speaker-separated output.
    pub supports_diarization: bool,
    /// Per-request payload limit, if the backend has one.
    pub max_size_bytes: Option<u64>,
    /// Whether an API key is available for this backend.
    pub credential_present: bool,
}

impl ProviderDescriptor {
    /// Diarization is an all-or-nothing request modifier: when the caller
    /// wants speaker separation, a backend that cannot produce it is skipped
    /// outright rather than invoked for plain text.
    pub fn skipped_for_diarization(&self, want_diarization: bool) -> bool {
        want_diarization && !self.supports_diarization
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for kind in ProviderKind::all() {
            assert_eq!(ProviderKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(ProviderKind::from_id("deepgram"), None);
    }

    #[test]
    fn diarization_skip_rule() {
        let descriptor = ProviderDescriptor {
            kind: ProviderKind::Whisper,
            priority: 1,
            supports_diarization: false,
            max_size_bytes: Some(25 * 1024 * 1024),
            credential_present: true,
        };
        assert!(descriptor.skipped_for_diarization(true));
        assert!(!descriptor.skipped_for_diarization(false));
    }
}
