use super::{EMPTY_DOCUMENT, FileStore, Loaded, ignore_already_exists};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::storage::{StorageBackend, non_empty_parent, temp_path_for};

use log::{debug, warn};
use std::path::Path;

impl<S: StorageBackend> FileStore<S> {
    /// Read the document at `path`, creating or repairing the file as needed
    ///
    /// Never fails: a missing file is created with `{}`, a corrupt one is
    /// deleted, and any other I/O error yields an empty document.
    pub fn read(&self, path: &Path) -> Document {
        match self.classify(path, std::fs::read(path)) {
            Loaded::Document(doc) => doc,
            Loaded::Missing => {
                if let Err(e) = self.create_empty(path) {
                    warn!("Could not create preference file: {e}");
                }
                Document::new()
            }
            Loaded::Corrupt(e) => {
                warn!("Removing corrupt preference file {}: {e}", path.display());
                self.delete(path);
                Document::new()
            }
            Loaded::Failed(e) => {
                warn!("{e}");
                Document::new()
            }
        }
    }

    /// Read and parse the document at `path` without any repair
    ///
    /// # Errors
    ///
    /// Returns the underlying read or parse error.
    pub fn try_read(&self, path: &Path) -> Result<Document> {
        self.storage.read(path)
    }

    /// Replace the file at `path` with `doc`, reporting success
    pub fn write(&self, path: &Path, doc: &Document) -> bool {
        match self.try_write(path, doc) {
            Ok(()) => true,
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    /// Replace the file at `path` with `doc`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub fn try_write(&self, path: &Path, doc: &Document) -> Result<()> {
        self.storage.write(path, doc)?;
        debug!("Wrote {} keys to {}", doc.len(), path.display());
        Ok(())
    }

    /// Remove the file at `path`, reporting whether it was removed
    pub fn delete(&self, path: &Path) -> bool {
        match self.try_delete(path) {
            Ok(()) => true,
            Err(e) => {
                debug!("{e}");
                false
            }
        }
    }

    /// Remove the file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be removed.
    pub fn try_delete(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path).map_err(|e| Error::FileDelete {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Deleted preference file {}", path.display());
        Ok(())
    }

    /// Create the parent directory and an empty document at `path`
    ///
    /// The document is written to a temp file and hard-linked into place, so
    /// `path` never exists without content and an existing file is left alone.
    fn create_empty(&self, path: &Path) -> Result<()> {
        if let Some(parent) = non_empty_parent(path) {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let temp_path = temp_path_for(path)?;
        std::fs::write(&temp_path, EMPTY_DOCUMENT).map_err(|e| Error::FileWrite {
            path: temp_path.clone(),
            source: e,
        })?;

        let linked = std::fs::hard_link(&temp_path, path);
        if let Err(e) = std::fs::remove_file(&temp_path) {
            debug!("Could not remove {}: {e}", temp_path.display());
        }

        ignore_already_exists(linked).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Created preference file {}", path.display());
        Ok(())
    }
}
