//! Configuration file management for polyscribe.
//!
//! This module handles loading and saving application configuration from TOML
//! files. Configuration is stored in the user's config directory. Provider
//! order and eligibility live here so the fallback chain is plain injected
//! configuration, not a hard-coded list.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::transcription::api::{DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_SECS};

/// Orchestration-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Language code forced on every request (e.g. "he") unless overridden
    /// on the command line. Unset lets providers auto-detect.
    #[serde(default)]
    pub default_language: Option<String>,
}

/// AssemblyAI provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyAiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Lower values are tried first
    #[serde(default)]
    pub priority: u8,
    /// Seconds between job status polls
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Poll attempts before the job is considered stuck
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
    /// API base URL override (primarily for testing)
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for AssemblyAiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: 0,
            poll_interval_secs: default_poll_interval_secs(),
            max_poll_attempts: default_max_poll_attempts(),
            endpoint: None,
        }
    }
}

/// Hosted Whisper provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_whisper_priority")]
    pub priority: u8,
    /// Largest accepted payload in MiB (free inference tier limit)
    #[serde(default = "default_whisper_max_size_mib")]
    pub max_size_mib: u64,
    /// Endpoint override (primarily for testing)
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: default_whisper_priority(),
            max_size_mib: default_whisper_max_size_mib(),
            endpoint: None,
        }
    }
}

/// Cloud Speech provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudSpeechConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_cloudspeech_priority")]
    pub priority: u8,
    /// Endpoint override (primarily for testing)
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for CloudSpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: default_cloudspeech_priority(),
            endpoint: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_max_poll_attempts() -> u32 {
    DEFAULT_MAX_POLL_ATTEMPTS
}

fn default_whisper_priority() -> u8 {
    1
}

fn default_whisper_max_size_mib() -> u64 {
    25
}

fn default_cloudspeech_priority() -> u8 {
    2
}

/// All provider configurations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub assemblyai: AssemblyAiConfig,
    #[serde(default)]
    pub whisper: WhisperConfig,
    #[serde(default)]
    pub cloudspeech: CloudSpeechConfig,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolyscribeConfig {
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl PolyscribeConfig {
    /// Loads configuration from the user's config directory, falling back to
    /// defaults when no config file exists yet.
    ///
    /// # Errors
    /// - If the config directory cannot be determined
    /// - If an existing config file cannot be read
    /// - If the TOML is malformed
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(&config_path)?;
        let config: PolyscribeConfig = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Saves configuration to the user's config directory.
    ///
    /// # Errors
    /// - If the config directory cannot be determined or created
    /// - If the file cannot be written
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = get_config_path()?;
        let config_content = toml::to_string_pretty(self)?;
        fs::write(&config_path, config_content)?;
        tracing::info!("Configuration saved");
        Ok(())
    }
}

/// Retrieves the path to the config file, creating parent directories as
/// needed.
///
/// # Errors
/// - If the home directory cannot be determined
pub fn get_config_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
    let config_path = home.join(".config").join("polyscribe").join("polyscribe.toml");

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    Ok(config_path)
}
