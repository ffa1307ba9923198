//! Shared helpers for transcription API adapters.
//!
//! Contains the failure-detail formatting used across provider
//! implementations so every adapter reports network and HTTP faults the same
//! way.

use crate::transcription::outcome::{FailureKind, ProviderFailure};

/// Formats a reqwest-level failure into a human-readable detail string.
pub fn transport_detail(provider: &str, e: &reqwest::Error) -> String {
    if e.is_connect() {
        format!("Failed to connect to the {provider} API server. Check your internet connection.")
    } else if e.is_timeout() {
        format!("Request to {provider} timed out. The API server is not responding.")
    } else {
        format!("{provider} network error: {e}")
    }
}

/// Formats HTTP error codes into human-readable messages.
pub fn http_status_detail(provider: &str, status: u16, error_body: &str) -> String {
    match status {
        401 => format!(
            "{provider} API key is invalid or expired. Please run 'polyscribe auth' to update it."
        ),
        403 => format!(
            "You don't have permission to use the {provider} API. Check your API key and account status."
        ),
        429 => format!(
            "Too many requests to {provider}. You've hit the API rate limit. Please wait and try again."
        ),
        500 | 502 | 503 | 504 => {
            format!("The {provider} API server is experiencing issues. Please try again later.")
        }
        _ => format!("{provider} API error (status {status}): {error_body}"),
    }
}

/// Maps a failed HTTP response into a failure of the given kind, consuming
/// the response body for detail.
pub async fn status_failure(
    kind: FailureKind,
    provider: &str,
    response: reqwest::Response,
) -> ProviderFailure {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    ProviderFailure::new(kind, http_status_detail(provider, status, &body))
}

/// Reads the artifact bytes for one provider attempt.
pub fn read_artifact(
    artifact: &crate::transcription::artifact::AudioArtifact,
) -> Result<Vec<u8>, ProviderFailure> {
    artifact.read().map_err(|e| {
        ProviderFailure::new(
            FailureKind::TransportError,
            format!("Failed to read audio content: {e}"),
        )
    })
}
