//! Configuration management for polyscribe.
//!
//! This module handles loading and saving application configuration from TOML
//! files, as well as storage of API credentials. Configuration is stored in
//! the user's config directory, while credentials are stored with restricted
//! permissions in the user's local data directory.

pub mod file;
pub mod secrets;

pub use file::{
    get_config_path, AssemblyAiConfig, CloudSpeechConfig, OrchestratorConfig, PolyscribeConfig,
    ProvidersConfig, WhisperConfig,
};
pub use secrets::{clear_api_key, save_api_key, CredentialStore};
