//! Transcription service for audio-to-text conversion.
//!
//! This module supports multiple transcription providers behind a unified
//! backend contract and a fallback orchestrator that tries them in priority
//! order until one produces a transcript.

pub mod api;
pub mod artifact;
pub mod orchestrator;
pub mod outcome;
pub mod provider;
pub mod request;

pub use artifact::AudioArtifact;
pub use orchestrator::{FallbackOrchestrator, OrchestrationOutcome, ProviderEntry};
pub use outcome::{FailureKind, ProviderFailure, SpeakerSegment, Transcript};
pub use provider::{ProviderDescriptor, ProviderKind};
pub use request::TranscriptionRequest;
