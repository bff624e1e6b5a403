//! Persistence for feed interactions.
//!
//! The on-disk blob is JSON wrapped in standard base64. The wrapping is only
//! obfuscation, it keeps the file from being casually edited. A
//! [`StorageBackend`] moves the encoded text to and from its medium so the
//! format code never touches the filesystem directly.

pub mod interactions;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use thiserror::Error;

pub use interactions::{Comment, InteractionStore, Interactions, VideoInteraction};

/// Constant the store file name is derived from.
const STORE_NAME: &str = "zasora_data";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored blob is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("stored blob is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("stored blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Medium the encoded interaction blob lives on.
pub trait StorageBackend {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, StorageError>;

    fn write(&mut self, contents: &str) -> Result<(), StorageError>;
}

/// File name of the store: the base64 form of a fixed constant.
pub fn store_file_name() -> String {
    STANDARD.encode(STORE_NAME)
}

/// Wrap `json` in the reversible base64 framing.
pub fn encode(json: &str) -> String {
    STANDARD.encode(json.as_bytes())
}

/// Undo [`encode`]. Surrounding whitespace is ignored.
pub fn decode(blob: &str) -> Result<String, StorageError> {
    let bytes = STANDARD.decode(blob.trim())?;
    Ok(String::from_utf8(bytes)?)
}

/// Store file inside a host-chosen data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Use the fixed store file name inside `dir`. The directory is created on
    /// first write.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(store_file_name()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, contents: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, contents)?;
        debug!("Wrote {} bytes to {}", contents.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the blob in memory; used for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<(), StorageError> {
        self.contents = Some(contents.to_string());
        Ok(())
    }
}
