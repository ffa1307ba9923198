//! Audio artifact handling.
//!
//! An [`AudioArtifact`] is an immutable handle to the audio content being
//! transcribed. Providers are tried sequentially and each attempt reads the
//! bytes fresh, so the handle must be re-readable across attempts.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Immutable reference to audio content, either on disk or in memory.
///
/// Adapters never mutate the artifact; they read it once per attempt.
#[derive(Debug, Clone)]
pub enum AudioArtifact {
    /// Audio stored in a file on disk.
    File(PathBuf),
    /// Audio held in an in-memory buffer.
    Buffer(Vec<u8>),
}

impl AudioArtifact {
    /// Creates an artifact backed by a file path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        AudioArtifact::File(path.into())
    }

    /// Creates an artifact backed by an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        AudioArtifact::Buffer(bytes)
    }

    /// Returns the size of the audio content in bytes.
    ///
    /// # Errors
    /// - If the backing file's metadata cannot be read
    pub fn size(&self) -> io::Result<u64> {
        match self {
            AudioArtifact::File(path) => Ok(fs::metadata(path)?.len()),
            AudioArtifact::Buffer(bytes) => Ok(bytes.len() as u64),
        }
    }

    /// Reads the full audio content.
    ///
    /// Re-readable: each provider attempt calls this independently.
    ///
    /// # Errors
    /// - If the backing file cannot be read
    pub fn read(&self) -> io::Result<Vec<u8>> {
        match self {
            AudioArtifact::File(path) => fs::read(path),
            AudioArtifact::Buffer(bytes) => Ok(bytes.clone()),
        }
    }
}
