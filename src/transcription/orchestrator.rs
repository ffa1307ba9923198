//! Fallback orchestration across transcription providers.
//!
//! Providers are tried one at a time in ascending priority order. The first
//! success wins and stops the chain; every failure is logged and the next
//! provider is tried. When diarization is requested, providers that cannot
//! produce it are skipped without being invoked. A run has exactly one
//! attempt per provider: no retries, no racing, no aggregation.

use std::time::Duration;

use super::api::{
    AssemblyAiAdapter, CloudSpeechAdapter, TranscriptionBackend, WhisperAdapter,
    MAX_SYNC_SIZE_BYTES,
};
use super::provider::{ProviderDescriptor, ProviderKind};
use super::request::TranscriptionRequest;
use crate::config::{CredentialStore, PolyscribeConfig};

/// One configured provider: its static descriptor and the adapter that
/// speaks its protocol.
pub struct ProviderEntry {
    pub descriptor: ProviderDescriptor,
    pub adapter: Box<dyn TranscriptionBackend>,
}

/// The only value returned to the caller of an orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestrationOutcome {
    /// A provider produced a transcript.
    Transcribed {
        text: String,
        provider: &'static str,
    },
    /// Every provider failed or was skipped.
    AllFailed,
}

/// Tries providers in priority order until one succeeds.
pub struct FallbackOrchestrator {
    providers: Vec<ProviderEntry>,
}

impl FallbackOrchestrator {
    /// Builds an orchestrator over the given providers, ordered by ascending
    /// priority. Ties keep their original list position (stable sort).
    pub fn new(mut providers: Vec<ProviderEntry>) -> Self {
        providers.sort_by_key(|entry| entry.descriptor.priority);
        Self { providers }
    }

    /// Builds the provider registry from configuration and credentials.
    ///
    /// Disabled providers are left out entirely. Credential presence is
    /// recorded on the descriptor for listing purposes; the adapters
    /// themselves fail with a missing-credential outcome when invoked
    /// without a key.
    pub fn from_config(config: &PolyscribeConfig, credentials: &CredentialStore) -> Self {
        let mut providers: Vec<ProviderEntry> = Vec::new();

        let assemblyai = &config.providers.assemblyai;
        if assemblyai.enabled {
            let key = credentials.get(ProviderKind::AssemblyAi.id());
            let mut adapter = AssemblyAiAdapter::new(key.map(str::to_string))
                .with_poll_interval(Duration::from_secs(assemblyai.poll_interval_secs))
                .with_max_poll_attempts(assemblyai.max_poll_attempts);
            if let Some(endpoint) = &assemblyai.endpoint {
                adapter = adapter.with_base_url(endpoint);
            }
            providers.push(ProviderEntry {
                descriptor: ProviderDescriptor {
                    kind: ProviderKind::AssemblyAi,
                    priority: assemblyai.priority,
                    supports_diarization: true,
                    max_size_bytes: None,
                    credential_present: key.is_some(),
                },
                adapter: Box::new(adapter),
            });
        }

        let whisper = &config.providers.whisper;
        if whisper.enabled {
            let key = credentials.get(ProviderKind::Whisper.id());
            let max_size_bytes = whisper.max_size_mib * 1024 * 1024;
            let mut adapter =
                WhisperAdapter::new(key.map(str::to_string)).with_max_size_bytes(max_size_bytes);
            if let Some(endpoint) = &whisper.endpoint {
                adapter = adapter.with_endpoint(endpoint);
            }
            providers.push(ProviderEntry {
                descriptor: ProviderDescriptor {
                    kind: ProviderKind::Whisper,
                    priority: whisper.priority,
                    supports_diarization: false,
                    max_size_bytes: Some(max_size_bytes),
                    credential_present: key.is_some(),
                },
                adapter: Box::new(adapter),
            });
        }

        let cloudspeech = &config.providers.cloudspeech;
        if cloudspeech.enabled {
            let key = credentials.get(ProviderKind::CloudSpeech.id());
            let mut adapter = CloudSpeechAdapter::new(key.map(str::to_string));
            if let Some(endpoint) = &cloudspeech.endpoint {
                adapter = adapter.with_endpoint(endpoint);
            }
            providers.push(ProviderEntry {
                descriptor: ProviderDescriptor {
                    kind: ProviderKind::CloudSpeech,
                    priority: cloudspeech.priority,
                    supports_diarization: false,
                    max_size_bytes: Some(MAX_SYNC_SIZE_BYTES),
                    credential_present: key.is_some(),
                },
                adapter: Box::new(adapter),
            });
        }

        Self::new(providers)
    }

    /// The configured providers in the order they will be tried.
    pub fn descriptors(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter().map(|entry| &entry.descriptor)
    }

    /// Runs the fallback chain for one request.
    ///
    /// Returns the first provider's transcript and name on success, or
    /// [`OrchestrationOutcome::AllFailed`] when the chain is exhausted.
    /// Adapter failures never escape this method; they are logged and the
    /// next provider is tried.
    pub async fn run(&self, request: &TranscriptionRequest) -> OrchestrationOutcome {
        for entry in &self.providers {
            let name = entry.descriptor.kind.name();

            if entry
                .descriptor
                .skipped_for_diarization(request.want_diarization)
            {
                tracing::info!("Skipping {name}: does not support speaker separation");
                continue;
            }

            tracing::info!("Trying {name}...");
            match entry.adapter.transcribe(request).await {
                Ok(transcript) => {
                    tracing::info!("Transcription succeeded with {name}");
                    return OrchestrationOutcome::Transcribed {
                        text: transcript.text,
                        provider: name,
                    };
                }
                Err(failure) => {
                    tracing::warn!("{name} failed ({failure}), trying next provider");
                }
            }
        }

        tracing::warn!("All transcription providers failed or were skipped");
        OrchestrationOutcome::AllFailed
    }
}
