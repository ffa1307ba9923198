//! Transcription API clients with provider-specific implementations.
//!
//! Each backend speaks a different protocol (single raw-bytes POST,
//! upload-then-poll, JSON recognize call) behind the common
//! [`TranscriptionBackend`] contract. Adapters capture every failure mode as
//! a [`ProviderFailure`](super::outcome::ProviderFailure) value; nothing
//! panics or propagates an uncaught fault across this boundary.

mod assemblyai;
mod cloudspeech;
mod shared;
mod whisper;

pub use assemblyai::{AssemblyAiAdapter, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_SECS};
pub use cloudspeech::{CloudSpeechAdapter, MAX_SYNC_SIZE_BYTES};
pub use whisper::WhisperAdapter;

use async_trait::async_trait;

use super::outcome::{ProviderFailure, Transcript};
use super::request::TranscriptionRequest;

/// Common call contract for every transcription backend.
///
/// Implementations check their own eligibility (credential present, size
/// limit) before any network traffic and return the corresponding failure
/// without making a call when ineligible.
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    async fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<Transcript, ProviderFailure>;
}
