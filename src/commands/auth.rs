//! API key storage for transcription providers.
//!
//! Keys are assumed to be provisioned with the provider already; this
//! command only stores or removes them locally.

use std::io::{self, BufRead, Write};

use crate::config::{clear_api_key, save_api_key};
use crate::transcription::ProviderKind;

/// Stores or clears the API key for a provider.
///
/// The key is read from stdin so it never lands in shell history.
///
/// # Errors
/// - If the provider id is unknown
/// - If the credential file cannot be written
pub fn handle_auth(provider: String, clear: bool) -> Result<(), anyhow::Error> {
    let kind = ProviderKind::from_id(&provider).ok_or_else(|| {
        let known = ProviderKind::all()
            .iter()
            .map(|k| k.id())
            .collect::<Vec<_>>()
            .join(", ");
        anyhow::anyhow!("Unknown provider '{provider}'. Known providers: {known}")
    })?;

    if clear {
        clear_api_key(kind.id())?;
        println!("Cleared API key for {}", kind.name());
        return Ok(());
    }

    print!("Paste API key for {}: ", kind.name());
    io::stdout().flush()?;

    let mut key = String::new();
    io::stdin().lock().read_line(&mut key)?;
    let key = key.trim();

    if key.is_empty() {
        return Err(anyhow::anyhow!("No API key entered"));
    }

    save_api_key(kind.id(), key)?;
    println!("Saved API key for {}", kind.name());
    Ok(())
}
