//! Hosted Whisper API implementation.
//!
//! Handles transcription requests against a hosted Whisper inference
//! endpoint with a single raw-bytes POST. The free inference tier rejects
//! large payloads, so eligibility is checked locally before any network
//! traffic.

use serde::Deserialize;

use super::shared::{read_artifact, status_failure, transport_detail};
use super::TranscriptionBackend;
use crate::transcription::outcome::{FailureKind, ProviderFailure, Transcript};
use crate::transcription::request::TranscriptionRequest;

const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/openai/whisper-large-v3";

/// Default payload limit for the hosted inference tier.
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 25 * 1024 * 1024;

/// Whisper API response wrapper
#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: Option<String>,
}

/// Single-call, size-limited Whisper backend.
pub struct WhisperAdapter {
    api_key: Option<String>,
    endpoint: String,
    max_size_bytes: u64,
    client: reqwest::Client,
}

impl WhisperAdapter {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            client: reqwest::Client::new(),
        }
    }

    /// Points the adapter at a different endpoint, e.g. a mock server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_max_size_bytes(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }
}

#[async_trait::async_trait]
impl TranscriptionBackend for WhisperAdapter {
    async fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<Transcript, ProviderFailure> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderFailure::new(
                FailureKind::MissingCredential,
                "No API key configured for Whisper",
            )
        })?;

        let size = request.artifact.size().map_err(|e| {
            ProviderFailure::new(
                FailureKind::TransportError,
                format!("Failed to read audio size: {e}"),
            )
        })?;
        if size > self.max_size_bytes {
            return Err(ProviderFailure::new(
                FailureKind::SizeExceeded,
                format!(
                    "audio is {size} bytes, Whisper accepts at most {} bytes",
                    self.max_size_bytes
                ),
            ));
        }

        let audio_data = read_artifact(&request.artifact)?;

        tracing::debug!("Posting {} bytes to Whisper", audio_data.len());
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("Content-Type", "application/octet-stream")
            .body(audio_data)
            .send()
            .await
            .map_err(|e| {
                ProviderFailure::new(FailureKind::TransportError, transport_detail("Whisper", &e))
            })?;

        if !response.status().is_success() {
            return Err(status_failure(FailureKind::TransportError, "Whisper", response).await);
        }

        let parsed: WhisperResponse = response.json().await.map_err(|e| {
            ProviderFailure::new(
                FailureKind::MalformedResponse,
                format!("Failed to parse Whisper response: {e}"),
            )
        })?;

        let text = parsed.text.ok_or_else(|| {
            ProviderFailure::new(
                FailureKind::MalformedResponse,
                "Whisper response carried no transcript text",
            )
        })?;

        tracing::debug!("Whisper transcription completed: {} chars", text.len());
        Ok(Transcript::plain(text.trim()))
    }
}
