//! polyscribe: speech-to-text transcription with automatic provider
//! fallback.
//!
//! Given an audio file and a prioritized set of hosted transcription
//! providers, polyscribe tries each provider in order and returns the first
//! transcript. Providers differ in protocol (single-shot HTTP, upload then
//! poll, synchronous recognize call), size limits, and whether they can
//! separate speakers; the orchestrator hides all of that behind one call.

pub mod commands;
pub mod config;
pub mod logging;
pub mod transcription;
