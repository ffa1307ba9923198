//! Fallback chain behavior with scripted backends.
//!
//! These tests drive the orchestrator with in-process fakes that count their
//! invocations, so chain policy (ordering, skipping, short-circuiting) can
//! be asserted without any network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use polyscribe::transcription::api::TranscriptionBackend;
use polyscribe::transcription::{
    AudioArtifact, FailureKind, FallbackOrchestrator, OrchestrationOutcome, ProviderDescriptor,
    ProviderEntry, ProviderFailure, ProviderKind, Transcript, TranscriptionRequest,
};

/// Backend that returns a canned outcome and counts how often it was called.
struct ScriptedBackend {
    outcome: Result<Transcript, ProviderFailure>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    fn succeeding(text: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                outcome: Ok(Transcript::plain(text)),
                calls: calls.clone(),
            },
            calls,
        )
    }

    fn failing(kind: FailureKind) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                outcome: Err(ProviderFailure::new(kind, "scripted failure")),
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl TranscriptionBackend for ScriptedBackend {
    async fn transcribe(
        &self,
        _request: &TranscriptionRequest,
    ) -> Result<Transcript, ProviderFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

fn entry(
    kind: ProviderKind,
    priority: u8,
    supports_diarization: bool,
    backend: ScriptedBackend,
) -> ProviderEntry {
    ProviderEntry {
        descriptor: ProviderDescriptor {
            kind,
            priority,
            supports_diarization,
            max_size_bytes: None,
            credential_present: true,
        },
        adapter: Box::new(backend),
    }
}

fn request() -> TranscriptionRequest {
    TranscriptionRequest::new(AudioArtifact::from_bytes(vec![0u8; 16]))
}

#[tokio::test]
async fn first_success_short_circuits() {
    let (first, first_calls) = ScriptedBackend::succeeding("from assemblyai");
    let (second, second_calls) = ScriptedBackend::succeeding("from whisper");

    let orchestrator = FallbackOrchestrator::new(vec![
        entry(ProviderKind::AssemblyAi, 0, true, first),
        entry(ProviderKind::Whisper, 1, false, second),
    ]);

    let outcome = orchestrator.run(&request()).await;

    assert_eq!(
        outcome,
        OrchestrationOutcome::Transcribed {
            text: "from assemblyai".to_string(),
            provider: "AssemblyAI",
        }
    );
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failure_advances_to_next_provider() {
    let (first, first_calls) = ScriptedBackend::failing(FailureKind::RemoteReportedError);
    let (second, second_calls) = ScriptedBackend::succeeding("from whisper");

    let orchestrator = FallbackOrchestrator::new(vec![
        entry(ProviderKind::AssemblyAi, 0, true, first),
        entry(ProviderKind::Whisper, 1, false, second),
    ]);

    let outcome = orchestrator.run(&request()).await;

    assert_eq!(
        outcome,
        OrchestrationOutcome::Transcribed {
            text: "from whisper".to_string(),
            provider: "Whisper",
        }
    );
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn providers_tried_in_ascending_priority_order() {
    // Registered out of order; the lowest priority value must win.
    let (low_priority, low_calls) = ScriptedBackend::succeeding("slow lane");
    let (high_priority, high_calls) = ScriptedBackend::succeeding("fast lane");

    let orchestrator = FallbackOrchestrator::new(vec![
        entry(ProviderKind::CloudSpeech, 2, false, low_priority),
        entry(ProviderKind::AssemblyAi, 0, true, high_priority),
    ]);

    let outcome = orchestrator.run(&request()).await;

    assert_eq!(
        outcome,
        OrchestrationOutcome::Transcribed {
            text: "fast lane".to_string(),
            provider: "AssemblyAI",
        }
    );
    assert_eq!(high_calls.load(Ordering::SeqCst), 1);
    assert_eq!(low_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn equal_priorities_keep_registration_order() {
    let (first, first_calls) = ScriptedBackend::succeeding("registered first");
    let (second, second_calls) = ScriptedBackend::succeeding("registered second");

    let orchestrator = FallbackOrchestrator::new(vec![
        entry(ProviderKind::Whisper, 1, false, first),
        entry(ProviderKind::CloudSpeech, 1, false, second),
    ]);

    let outcome = orchestrator.run(&request()).await;

    assert_eq!(
        outcome,
        OrchestrationOutcome::Transcribed {
            text: "registered first".to_string(),
            provider: "Whisper",
        }
    );
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn diarization_request_never_invokes_non_supporting_providers() {
    let (plain, plain_calls) = ScriptedBackend::succeeding("plain text");
    let (diarizing, diarizing_calls) = ScriptedBackend::succeeding("Speaker A: hi");

    let orchestrator = FallbackOrchestrator::new(vec![
        entry(ProviderKind::Whisper, 0, false, plain),
        entry(ProviderKind::AssemblyAi, 1, true, diarizing),
    ]);

    let outcome = orchestrator.run(&request().with_diarization(true)).await;

    assert_eq!(
        outcome,
        OrchestrationOutcome::Transcribed {
            text: "Speaker A: hi".to_string(),
            provider: "AssemblyAI",
        }
    );
    assert_eq!(plain_calls.load(Ordering::SeqCst), 0);
    assert_eq!(diarizing_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn diarization_request_can_exhaust_the_chain() {
    // Both providers would succeed with plain text, but diarization is
    // all-or-nothing: neither supports it, so neither is invoked.
    let (first, first_calls) = ScriptedBackend::succeeding("plain");
    let (second, second_calls) = ScriptedBackend::succeeding("plain");

    let orchestrator = FallbackOrchestrator::new(vec![
        entry(ProviderKind::Whisper, 0, false, first),
        entry(ProviderKind::CloudSpeech, 1, false, second),
    ]);

    let outcome = orchestrator.run(&request().with_diarization(true)).await;

    assert_eq!(outcome, OrchestrationOutcome::AllFailed);
    assert_eq!(first_calls.load(Ordering::SeqCst), 0);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn exhausted_chain_reports_all_failed() {
    let (first, _) = ScriptedBackend::failing(FailureKind::UploadError);
    let (second, _) = ScriptedBackend::failing(FailureKind::TransportError);
    let (third, _) = ScriptedBackend::failing(FailureKind::EmptyResult);

    let orchestrator = FallbackOrchestrator::new(vec![
        entry(ProviderKind::AssemblyAi, 0, true, first),
        entry(ProviderKind::Whisper, 1, false, second),
        entry(ProviderKind::CloudSpeech, 2, false, third),
    ]);

    let outcome = orchestrator.run(&request()).await;

    assert_eq!(outcome, OrchestrationOutcome::AllFailed);
    assert!(!matches!(
        outcome,
        OrchestrationOutcome::Transcribed { .. }
    ));
}

#[tokio::test]
async fn empty_registry_reports_all_failed() {
    let orchestrator = FallbackOrchestrator::new(vec![]);
    assert_eq!(orchestrator.run(&request()).await, OrchestrationOutcome::AllFailed);
}
