use super::{EMPTY_DOCUMENT, FileStore, Loaded, ignore_already_exists};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::storage::{StorageBackend, non_empty_parent, temp_path_for};

use log::{debug, warn};
use std::path::Path;
use tokio::fs;

impl<S: StorageBackend> FileStore<S> {
    /// Async counterpart of [`FileStore::read`]
    pub async fn read_async(&self, path: &Path) -> Document {
        match self.classify(path, fs::read(path).await) {
            Loaded::Document(doc) => doc,
            Loaded::Missing => {
                if let Err(e) = self.create_empty_async(path).await {
                    warn!("Could not create preference file: {e}");
                }
                Document::new()
            }
            Loaded::Corrupt(e) => {
                warn!("Removing corrupt preference file {}: {e}", path.display());
                self.delete_async(path).await;
                Document::new()
            }
            Loaded::Failed(e) => {
                warn!("{e}");
                Document::new()
            }
        }
    }

    /// Async counterpart of [`FileStore::write`]
    pub async fn write_async(&self, path: &Path, doc: &Document) -> bool {
        match self.try_write_async(path, doc).await {
            Ok(()) => true,
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    /// Async counterpart of [`FileStore::try_write`]
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub async fn try_write_async(&self, path: &Path, doc: &Document) -> Result<()> {
        let content = self.storage.serialize(doc)?;

        if let Some(parent) = non_empty_parent(path) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let temp_path = temp_path_for(path)?;
        fs::write(&temp_path, content)
            .await
            .map_err(|e| Error::FileWrite {
                path: temp_path.clone(),
                source: e,
            })?;

        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(Error::FileWrite {
                path: path.to_path_buf(),
                source: e,
            });
        }

        debug!("Wrote {} keys to {}", doc.len(), path.display());
        Ok(())
    }

    /// Async counterpart of [`FileStore::delete`]
    pub async fn delete_async(&self, path: &Path) -> bool {
        match fs::remove_file(path).await {
            Ok(()) => {
                debug!("Deleted preference file {}", path.display());
                true
            }
            Err(e) => {
                debug!(
                    "{}",
                    Error::FileDelete {
                        path: path.to_path_buf(),
                        source: e,
                    }
                );
                false
            }
        }
    }

    async fn create_empty_async(&self, path: &Path) -> Result<()> {
        if let Some(parent) = non_empty_parent(path) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let temp_path = temp_path_for(path)?;
        fs::write(&temp_path, EMPTY_DOCUMENT)
            .await
            .map_err(|e| Error::FileWrite {
                path: temp_path.clone(),
                source: e,
            })?;

        // Linking fails if the path was created meanwhile
        let created = fs::hard_link(&temp_path, path).await;
        if let Err(e) = fs::remove_file(&temp_path).await {
            debug!("Could not remove {}: {e}", temp_path.display());
        }

        ignore_already_exists(created).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Created preference file {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonStorage;
    use serde_json::json;
    use tempfile::tempdir;

    fn store() -> FileStore {
        FileStore::new(JsonStorage::new())
    }

    #[tokio::test]
    async fn test_read_async_missing_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/Settings.json");

        assert!(store().read_async(&path).await.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_read_async_corrupt_file_removes_it() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Settings.json");
        std::fs::write(&path, "][").unwrap();

        assert!(store().read_async(&path).await.is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_read_async_non_utf8_file_removes_it() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Settings.json");
        std::fs::write(&path, [0xff, 0xfe, b'{', b'}']).unwrap();

        assert!(store().read_async(&path).await.is_empty());
        assert!(!path.exists());

        assert!(store().read_async(&path).await.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_create_empty_async_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Settings.json");
        std::fs::write(&path, r#"{"kept":"yes"}"#).unwrap();

        store().create_empty_async(&path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"kept":"yes"}"#);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_write_async_then_read_blocking() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Settings.json");
        let mut doc = Document::new();
        doc.insert("lang".into(), json!("en"));

        assert!(store().write_async(&path, &doc).await);
        assert_eq!(store().read(&path), doc);
    }

    #[tokio::test]
    async fn test_delete_async() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Settings.json");
        std::fs::write(&path, "{}").unwrap();

        assert!(store().delete_async(&path).await);
        assert!(!store().delete_async(&path).await);
    }
}
