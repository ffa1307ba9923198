//! Transcribe an audio file through the provider fallback chain.

use std::path::PathBuf;

use crate::config::{CredentialStore, PolyscribeConfig};
use crate::transcription::{
    AudioArtifact, FallbackOrchestrator, OrchestrationOutcome, TranscriptionRequest,
};

/// Handles transcription of an audio file.
///
/// Builds the provider registry from configuration and credentials, runs the
/// fallback chain, and routes the transcript to the requested destination.
///
/// # Arguments
/// * `file` - Path to the audio file to transcribe
/// * `diarize` - Request speaker-separated output (skips providers that
///   cannot produce it)
/// * `language` - Forced language code, overriding the configured default
/// * `output_file` - Optional file path to write the transcript to instead
///   of stdout
pub async fn handle_transcribe(
    file: PathBuf,
    diarize: bool,
    language: Option<String>,
    output_file: Option<String>,
) -> Result<(), anyhow::Error> {
    tracing::info!("=== polyscribe Transcribe Command ===");

    if !file.exists() {
        return Err(anyhow::anyhow!("Audio file not found: {}", file.display()));
    }

    tracing::info!("Transcribing file: {}", file.display());

    let config = PolyscribeConfig::load_or_default().map_err(|err| {
        tracing::error!("Failed to load configuration: {err}");
        anyhow::anyhow!("Configuration error: {err}")
    })?;
    let credentials = CredentialStore::load()?;

    let language_hint = language.or_else(|| config.orchestrator.default_language.clone());
    let request = TranscriptionRequest::new(AudioArtifact::from_path(&file))
        .with_diarization(diarize)
        .with_language(language_hint);

    let orchestrator = FallbackOrchestrator::from_config(&config, &credentials);

    match orchestrator.run(&request).await {
        OrchestrationOutcome::Transcribed { text, provider } => {
            if let Some(file_path) = output_file {
                std::fs::write(&file_path, &text)
                    .map_err(|e| anyhow::anyhow!("Failed to write to file '{file_path}': {e}"))?;
                tracing::debug!("Transcript written to file: {file_path}");
            } else {
                println!("{text}");
            }
            eprintln!("Transcribed with {provider}");
            Ok(())
        }
        OrchestrationOutcome::AllFailed => Err(anyhow::anyhow!(
            "All transcription providers failed. Check your API keys with 'polyscribe providers' and try again."
        )),
    }
}
