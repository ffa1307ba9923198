//! API credential storage and lookup.
//!
//! Credentials live in a TOML file in the user's local data directory with
//! restricted permissions. Lookup goes through [`CredentialStore`], which is
//! built once and passed explicitly into registry construction; adapters
//! never read keys from ambient process state.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context};

/// In-memory view of the provider credentials available for this run.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    keys: HashMap<String, String>,
}

impl CredentialStore {
    /// Loads the credential file, returning an empty store when none exists.
    ///
    /// # Errors
    /// - If the data directory cannot be determined
    /// - If an existing credential file cannot be read or parsed
    pub fn load() -> anyhow::Result<Self> {
        let path = credentials_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read credentials file {}", path.display()))?;
        let keys: HashMap<String, String> =
            toml::from_str(&content).context("Credentials file is not valid TOML")?;
        Ok(Self { keys })
    }

    /// Builds a store from explicit pairs. Used by tests and embedders.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            keys: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, provider_id: &str) -> Option<&str> {
        self.keys.get(provider_id).map(String::as_str)
    }

    pub fn has_credential(&self, provider_id: &str) -> bool {
        self.keys.contains_key(provider_id)
    }
}

/// Stores an API key for a provider, creating the credential file if needed.
///
/// # Errors
/// - If the data directory cannot be determined or created
/// - If the credential file cannot be read or written
pub fn save_api_key(provider_id: &str, api_key: &str) -> anyhow::Result<()> {
    let path = credentials_path()?;
    let mut keys: HashMap<String, String> = if path.exists() {
        toml::from_str(&fs::read_to_string(&path)?)?
    } else {
        HashMap::new()
    };
    keys.insert(provider_id.to_string(), api_key.to_string());
    write_credentials(&path, &keys)
}

/// Removes a provider's API key, if present.
///
/// # Errors
/// - If the credential file exists but cannot be read or written
pub fn clear_api_key(provider_id: &str) -> anyhow::Result<()> {
    let path = credentials_path()?;
    if !path.exists() {
        return Ok(());
    }
    let mut keys: HashMap<String, String> = toml::from_str(&fs::read_to_string(&path)?)?;
    keys.remove(provider_id);
    write_credentials(&path, &keys)
}

fn write_credentials(path: &PathBuf, keys: &HashMap<String, String>) -> anyhow::Result<()> {
    let content = toml::to_string_pretty(keys)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write credentials file {}", path.display()))?;
    restrict_permissions(path)?;
    Ok(())
}

/// Credential file is owner-readable only.
#[cfg(unix)]
fn restrict_permissions(path: &PathBuf) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let permissions = fs::Permissions::from_mode(0o600);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &PathBuf) -> anyhow::Result<()> {
    Ok(())
}

/// Path of the credentials file in the user's local data directory.
///
/// # Errors
/// - If the home directory cannot be determined
fn credentials_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    let data_dir = home.join(".local").join("share").join("polyscribe");
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join("credentials.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_from_pairs_answers_lookups() {
        let store = CredentialStore::from_pairs([("assemblyai", "key-a"), ("whisper", "key-b")]);
        assert!(store.has_credential("assemblyai"));
        assert_eq!(store.get("whisper"), Some("key-b"));
        assert!(!store.has_credential("cloudspeech"));
        assert_eq!(store.get("cloudspeech"), None);
    }
}
