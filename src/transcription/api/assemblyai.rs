//! AssemblyAI API implementation.
//!
//! Handles transcription requests to AssemblyAI's API using an
//! upload→transcribe→poll pattern. Unlike the single-shot providers,
//! AssemblyAI requires:
//! 1. Upload audio binary data to get an upload URL
//! 2. Submit a transcription job with the upload URL and options
//! 3. Poll for the job to reach a terminal status
//!
//! This is the only backend that can produce speaker-separated output:
//! with diarization requested, the completed job's utterances are rendered
//! as `Speaker {id}: {text}` blocks in utterance order.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::shared::{read_artifact, status_failure, transport_detail};
use super::TranscriptionBackend;
use crate::transcription::outcome::{FailureKind, ProviderFailure, SpeakerSegment, Transcript};
use crate::transcription::request::TranscriptionRequest;

const DEFAULT_BASE_URL: &str = "https://api.assemblyai.com/v2";

/// Polling interval between job status checks
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Maximum number of poll attempts before giving up on a job (10 minutes at
/// 5-second intervals). A job that never reaches a terminal status must not
/// hang the whole fallback chain.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 120;

/// Response from the upload endpoint
#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

/// Request body for the transcription endpoint
#[derive(Debug, Serialize)]
struct TranscriptRequest {
    audio_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speaker_labels: Option<bool>,
}

/// One speaker turn in a completed transcript
#[derive(Debug, Deserialize)]
struct UtteranceResponse {
    speaker: String,
    text: String,
}

/// Response from the transcription endpoint (both submit and poll)
#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    id: Option<String>,
    status: String,
    text: Option<String>,
    error: Option<String>,
    utterances: Option<Vec<UtteranceResponse>>,
}

/// Asynchronous upload-and-poll backend with diarization support.
pub struct AssemblyAiAdapter {
    api_key: Option<String>,
    base_url: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
    client: reqwest::Client,
}

impl AssemblyAiAdapter {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            client: reqwest::Client::new(),
        }
    }

    /// Points the adapter at a different API base URL, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts;
        self
    }

    async fn upload(&self, api_key: &str, audio_data: Vec<u8>) -> Result<String, ProviderFailure> {
        tracing::debug!("Uploading {} bytes to AssemblyAI", audio_data.len());
        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .header("Authorization", api_key)
            .header("Content-Type", "application/octet-stream")
            .body(audio_data)
            .send()
            .await
            .map_err(|e| {
                ProviderFailure::new(FailureKind::UploadError, transport_detail("AssemblyAI", &e))
            })?;

        if !response.status().is_success() {
            return Err(status_failure(FailureKind::UploadError, "AssemblyAI", response).await);
        }

        let upload: UploadResponse = response.json().await.map_err(|e| {
            ProviderFailure::new(
                FailureKind::UploadError,
                format!("Failed to parse AssemblyAI upload response: {e}"),
            )
        })?;

        tracing::debug!("Audio uploaded successfully");
        Ok(upload.upload_url)
    }

    async fn submit(
        &self,
        api_key: &str,
        request: &TranscriptionRequest,
        upload_url: String,
    ) -> Result<String, ProviderFailure> {
        let body = TranscriptRequest {
            audio_url: upload_url,
            language_code: request.language_hint.clone(),
            speaker_labels: request.want_diarization.then_some(true),
        };

        tracing::debug!("Submitting transcription request...");
        let response = self
            .client
            .post(format!("{}/transcript", self.base_url))
            .header("Authorization", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ProviderFailure::new(
                    FailureKind::SubmissionError,
                    transport_detail("AssemblyAI", &e),
                )
            })?;

        if !response.status().is_success() {
            return Err(status_failure(FailureKind::SubmissionError, "AssemblyAI", response).await);
        }

        let transcript: TranscriptResponse = response.json().await.map_err(|e| {
            ProviderFailure::new(
                FailureKind::SubmissionError,
                format!("Failed to parse AssemblyAI submit response: {e}"),
            )
        })?;

        transcript.id.ok_or_else(|| {
            ProviderFailure::new(
                FailureKind::SubmissionError,
                "AssemblyAI submit response carried no job id",
            )
        })
    }

    async fn poll(
        &self,
        api_key: &str,
        transcript_id: &str,
        want_diarization: bool,
    ) -> Result<Transcript, ProviderFailure> {
        let poll_url = format!("{}/transcript/{transcript_id}", self.base_url);

        for attempt in 1..=self.max_poll_attempts {
            let response = self
                .client
                .get(&poll_url)
                .header("Authorization", api_key)
                .send()
                .await
                .map_err(|e| {
                    ProviderFailure::new(
                        FailureKind::TransportError,
                        transport_detail("AssemblyAI", &e),
                    )
                })?;

            if !response.status().is_success() {
                return Err(
                    status_failure(FailureKind::TransportError, "AssemblyAI", response).await,
                );
            }

            let result: TranscriptResponse = response.json().await.map_err(|e| {
                ProviderFailure::new(
                    FailureKind::MalformedResponse,
                    format!("Failed to parse AssemblyAI poll response: {e}"),
                )
            })?;

            tracing::debug!(
                "Poll attempt {}/{}: status={}, id={}",
                attempt,
                self.max_poll_attempts,
                result.status,
                transcript_id
            );

            if result.status == "completed" {
                return finish(result, want_diarization);
            }
            if result.status == "error" {
                let error = result
                    .error
                    .unwrap_or_else(|| "Unknown transcription error".to_string());
                return Err(ProviderFailure::new(FailureKind::RemoteReportedError, error));
            }

            // Still queued or processing
            tokio::time::sleep(self.poll_interval).await;
        }

        Err(ProviderFailure::new(
            FailureKind::TransportError,
            format!(
                "AssemblyAI transcription timed out after {} seconds. The audio may be too long or the API is experiencing delays.",
                self.max_poll_attempts as u64 * self.poll_interval.as_secs()
            ),
        ))
    }
}

/// Turns a completed job into the final transcript, preferring utterance
/// data when diarization was requested.
fn finish(
    result: TranscriptResponse,
    want_diarization: bool,
) -> Result<Transcript, ProviderFailure> {
    if want_diarization {
        if let Some(utterances) = result.utterances.filter(|u| !u.is_empty()) {
            let segments = utterances
                .into_iter()
                .map(|u| SpeakerSegment {
                    speaker: u.speaker,
                    text: u.text,
                })
                .collect();
            return Ok(Transcript::from_segments(segments));
        }
    }

    let text = result.text.ok_or_else(|| {
        ProviderFailure::new(
            FailureKind::MalformedResponse,
            "AssemblyAI returned completed status but no transcript text",
        )
    })?;
    tracing::debug!("Transcription completed: {} chars", text.len());
    Ok(Transcript::plain(text.trim()))
}

#[async_trait::async_trait]
impl TranscriptionBackend for AssemblyAiAdapter {
    async fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<Transcript, ProviderFailure> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            ProviderFailure::new(
                FailureKind::MissingCredential,
                "No API key configured for AssemblyAI",
            )
        })?;

        let audio_data = read_artifact(&request.artifact)?;

        let upload_url = self.upload(&api_key, audio_data).await?;
        let transcript_id = self.submit(&api_key, request, upload_url).await?;
        tracing::debug!("Transcription submitted, id: {transcript_id}");

        self.poll(&api_key, &transcript_id, request.want_diarization)
            .await
    }
}
