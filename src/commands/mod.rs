//! Application command handlers for polyscribe.
//!
//! This module organizes command handling into separate submodules, each
//! responsible for a specific application command.
//!
//! # Commands
//! - `transcribe`: Transcribe an audio file through the fallback chain
//! - `providers`: List configured providers and their capabilities
//! - `auth`: API key storage per provider
//! - `config`: Show (and initialize) the configuration file
//! - `logs`: Display recent log entries

pub mod auth;
pub mod config;
pub mod logs;
pub mod providers;
pub mod transcribe;

pub use auth::handle_auth;
pub use config::handle_config;
pub use logs::handle_logs;
pub use providers::handle_providers;
pub use transcribe::handle_transcribe;
