//! List configured transcription providers.

use crate::config::{CredentialStore, PolyscribeConfig};
use crate::transcription::FallbackOrchestrator;

/// Prints the configured providers in the order the fallback chain will try
/// them, with their capabilities and credential status.
pub fn handle_providers() -> Result<(), anyhow::Error> {
    let config = PolyscribeConfig::load_or_default()?;
    let credentials = CredentialStore::load()?;
    let orchestrator = FallbackOrchestrator::from_config(&config, &credentials);

    println!("Providers in fallback order:");
    println!();

    for descriptor in orchestrator.descriptors() {
        let size_limit = match descriptor.max_size_bytes {
            Some(bytes) => format!("{} MiB max", bytes / (1024 * 1024)),
            None => "no size limit".to_string(),
        };
        let diarization = if descriptor.supports_diarization {
            "speaker separation"
        } else {
            "plain text only"
        };
        let credential = if descriptor.credential_present {
            "key configured"
        } else {
            "no API key"
        };
        println!(
            "  [{}] {:<12} {} | {} | {}",
            descriptor.priority,
            descriptor.kind.name(),
            diarization,
            size_limit,
            credential
        );
    }

    println!();
    println!("Add a key with 'polyscribe auth <provider>'.");
    Ok(())
}
