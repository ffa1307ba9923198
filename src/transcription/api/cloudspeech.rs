//! Cloud Speech recognition API implementation.
//!
//! Handles transcription through the cloud recognition service's synchronous
//! recognize call: one JSON request carrying the base64-encoded audio, one
//! response carrying result segments. The synchronous API hard-limits payload
//! size, so oversized artifacts fail locally without a call.

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::shared::{read_artifact, status_failure, transport_detail};
use super::TranscriptionBackend;
use crate::transcription::outcome::{FailureKind, ProviderFailure, Transcript};
use crate::transcription::request::TranscriptionRequest;

const DEFAULT_ENDPOINT: &str = "https://speech.googleapis.com/v1/speech:recognize";

/// Hard limit of the synchronous recognize API. Larger audio must go through
/// a different backend; exceeding this yields a local failure with no call.
pub const MAX_SYNC_SIZE_BYTES: u64 = 10 * 1024 * 1024;

const DEFAULT_LANGUAGE_CODE: &str = "en-US";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    language_code: String,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Deserialize)]
struct SpeechAlternative {
    transcript: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpeechResult {
    #[serde(default)]
    alternatives: Vec<SpeechAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<SpeechResult>,
}

/// Synchronous cloud recognition backend.
pub struct CloudSpeechAdapter {
    api_key: Option<String>,
    endpoint: String,
    client: reqwest::Client,
}

impl CloudSpeechAdapter {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Points the adapter at a different endpoint, e.g. a mock server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Concatenates the top alternative of every result segment, in result
/// order, separated by single spaces.
fn join_results(response: RecognizeResponse) -> String {
    response
        .results
        .iter()
        .filter_map(|result| result.alternatives.first())
        .filter_map(|alternative| alternative.transcript.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[async_trait::async_trait]
impl TranscriptionBackend for CloudSpeechAdapter {
    async fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<Transcript, ProviderFailure> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderFailure::new(
                FailureKind::MissingCredential,
                "No API key configured for Cloud Speech",
            )
        })?;

        let size = request.artifact.size().map_err(|e| {
            ProviderFailure::new(
                FailureKind::TransportError,
                format!("Failed to read audio size: {e}"),
            )
        })?;
        if size > MAX_SYNC_SIZE_BYTES {
            return Err(ProviderFailure::new(
                FailureKind::SizeExceeded,
                format!(
                    "audio is {size} bytes, the synchronous recognize API accepts at most {MAX_SYNC_SIZE_BYTES} bytes"
                ),
            ));
        }

        let audio_data = read_artifact(&request.artifact)?;

        let body = RecognizeRequest {
            config: RecognitionConfig {
                language_code: request
                    .language_hint
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_string()),
            },
            audio: RecognitionAudio {
                content: base64::engine::general_purpose::STANDARD.encode(audio_data),
            },
        };

        tracing::debug!("Sending recognize request to Cloud Speech");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ProviderFailure::new(
                    FailureKind::TransportError,
                    transport_detail("Cloud Speech", &e),
                )
            })?;

        if !response.status().is_success() {
            return Err(
                status_failure(FailureKind::TransportError, "Cloud Speech", response).await,
            );
        }

        let parsed: RecognizeResponse = response.json().await.map_err(|e| {
            ProviderFailure::new(
                FailureKind::TransportError,
                format!("Failed to parse Cloud Speech response: {e}"),
            )
        })?;

        let text = join_results(parsed);
        if text.is_empty() {
            return Err(ProviderFailure::new(
                FailureKind::EmptyResult,
                "Cloud Speech returned no transcript segments",
            ));
        }

        tracing::debug!("Cloud Speech transcription completed: {} chars", text.len());
        Ok(Transcript::plain(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternative(text: &str) -> SpeechAlternative {
        SpeechAlternative {
            transcript: Some(text.to_string()),
        }
    }

    #[test]
    fn joins_top_alternatives_with_single_spaces() {
        let response = RecognizeResponse {
            results: vec![
                SpeechResult {
                    alternatives: vec![alternative("hello"), alternative("jello")],
                },
                SpeechResult {
                    alternatives: vec![alternative("world")],
                },
            ],
        };
        assert_eq!(join_results(response), "hello world");
    }

    #[test]
    fn empty_results_join_to_empty_string() {
        let response = RecognizeResponse { results: vec![] };
        assert_eq!(join_results(response), "");

        let response = RecognizeResponse {
            results: vec![SpeechResult {
                alternatives: vec![],
            }],
        };
        assert_eq!(join_results(response), "");
    }
}
