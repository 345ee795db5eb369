//! File access layer for preference documents
//!
//! [`FileStore`] reads, writes and deletes whole preference documents. It is
//! fail-open: I/O problems are logged and folded into `{}`/`false`, and a
//! missing file (or directory) is created on first read. A file whose content
//! does not parse as a JSON object is deleted and read as `{}`.
//!
//! Each operation comes in three flavours with identical semantics:
//!
//! - blocking (`read`, `write`, `delete`)
//! - async (`read_async`, ...), behind the `async` feature
//! - completion-notified (`read_with`, ...), run on a worker thread

mod blocking;
mod callback;
#[cfg(feature = "async")]
mod nonblocking;

use crate::document::Document;
use crate::error::Error;
use crate::storage::{JsonStorage, StorageBackend};

use std::io;
use std::path::Path;

/// Content of a freshly created preference file
pub(crate) const EMPTY_DOCUMENT: &str = "{}";

/// Reads and writes preference documents through a [`StorageBackend`]
#[derive(Clone, Debug, Default)]
pub struct FileStore<S: StorageBackend = JsonStorage> {
    storage: S,
}

/// Outcome of loading a file, before the fail-open policy is applied
pub(crate) enum Loaded {
    Document(Document),
    Missing,
    Corrupt(Error),
    Failed(Error),
}

impl<S: StorageBackend> FileStore<S> {
    /// Create a store on top of the given backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Get the storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Classify the raw bytes read from `path`
    ///
    /// Content that is not UTF-8 is as corrupt as content that does not parse.
    pub(crate) fn classify(&self, path: &Path, read: io::Result<Vec<u8>>) -> Loaded {
        match read {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(content) => match self.storage.deserialize::<Document>(&content) {
                    Ok(doc) => Loaded::Document(doc),
                    Err(e) => Loaded::Corrupt(e),
                },
                Err(e) => Loaded::Corrupt(Error::FileRead {
                    path: path.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::InvalidData, e),
                }),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Loaded::Missing,
            Err(e) => Loaded::Failed(Error::FileRead {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

/// Treat "someone else created it first" as success when creating the empty file
pub(crate) fn ignore_already_exists(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify() {
        let store = FileStore::new(JsonStorage::new());
        let path = Path::new("prefs.json");

        match store.classify(path, Ok(br#"{"a":"1"}"#.to_vec())) {
            Loaded::Document(doc) => assert_eq!(doc.get("a"), Some(&json!("1"))),
            _ => panic!("expected a document"),
        }
        assert!(matches!(
            store.classify(path, Ok(b"{not json".to_vec())),
            Loaded::Corrupt(_)
        ));
        assert!(matches!(
            store.classify(path, Ok(b"\"just a string\"".to_vec())),
            Loaded::Corrupt(_)
        ));
        assert!(matches!(
            store.classify(path, Ok(vec![0xff, 0xfe, b'{', b'}'])),
            Loaded::Corrupt(Error::FileRead { .. })
        ));
        assert!(matches!(
            store.classify(path, Err(io::ErrorKind::NotFound.into())),
            Loaded::Missing
        ));
        assert!(matches!(
            store.classify(path, Err(io::ErrorKind::PermissionDenied.into())),
            Loaded::Failed(Error::FileRead { .. })
        ));
    }

    #[test]
    fn test_ignore_already_exists() {
        assert!(ignore_already_exists(Err(io::ErrorKind::AlreadyExists.into())).is_ok());
        assert!(ignore_already_exists(Err(io::ErrorKind::PermissionDenied.into())).is_err());
    }
}
