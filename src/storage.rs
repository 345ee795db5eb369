//! Storage backend trait and the JSON implementation
//!
//! The backend only knows how to turn documents into text and back, and how
//! to put that text on disk. Whether an error is surfaced or swallowed is
//! decided one level up, in [`FileStore`](crate::FileStore).

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Trait for storage backend implementations
pub trait StorageBackend: Clone + Send + Sync + 'static {
    /// File extension for this storage format (e.g., "json")
    fn extension(&self) -> &str;

    /// Serialize data to string
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String>;

    /// Deserialize data from string
    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T>;

    /// Read and deserialize from file
    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.deserialize(&content)
    }

    /// Serialize and write to file
    ///
    /// Uses atomic write: writes to a sibling temp file then renames it over
    /// the target, so readers never observe a half-written document.
    fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let content = self.serialize(data)?;

        if let Some(parent) = non_empty_parent(path) {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let temp_path = temp_path_for(path)?;
        std::fs::write(&temp_path, &content).map_err(|e| Error::FileWrite {
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            Error::FileWrite {
                path: path.to_path_buf(),
                source: e,
            }
        })
    }
}

/// Parent directory of `path`, skipping the empty parent of bare file names
pub(crate) fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Sibling temp file used for atomic writes (`Settings.json` -> `Settings.json.<pid>.<n>.tmp`)
///
/// Every call gets a fresh name so concurrent writers never share a temp file.
pub(crate) fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| Error::FileWrite {
        path: path.to_path_buf(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path must end in a file name",
        ),
    })?;
    let mut temp_filename = file_name.to_os_string();
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    temp_filename.push(format!(".{}.{seq}.tmp", std::process::id()));
    Ok(path.with_file_name(temp_filename))
}

// =============================================================================
// JSON Storage Implementation
// =============================================================================

/// JSON storage backend (default)
///
/// Compact output by default, matching what `deserialize` hands back to callers.
#[derive(Clone, Debug, Default)]
pub struct JsonStorage {
    /// Pretty print JSON output
    pretty: bool,
}

impl JsonStorage {
    /// Create a compact JSON storage backend
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Create a JSON storage backend with pretty printing enabled
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Whether files are written pretty printed
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl StorageBackend for JsonStorage {
    fn extension(&self) -> &str {
        "json"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(data).map_err(Error::from)
        } else {
            serde_json::to_string(data).map_err(Error::from)
        }
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(Error::from)
    }
}

// =============================================================================
// Tests
// =============================================================================
