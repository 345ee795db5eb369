//! Completion-notified file operations
//!
//! Each call moves its work onto a worker thread and hands the outcome to the
//! supplied continuation as a `Result`. The returned handle can be joined by
//! callers that need to wait for the continuation to have run.

use super::FileStore;
use crate::document::Document;
use crate::error::Result;
use crate::storage::StorageBackend;

use std::path::PathBuf;
use std::thread::{self, JoinHandle};

impl<S: StorageBackend> FileStore<S> {
    /// Callback counterpart of [`FileStore::read`]
    pub fn read_with<F>(&self, path: PathBuf, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Document>) + Send + 'static,
    {
        let store = self.clone();
        thread::spawn(move || callback(Ok(store.read(&path))))
    }

    /// Callback counterpart of [`FileStore::write`]
    pub fn write_with<F>(&self, path: PathBuf, doc: Document, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<bool>) + Send + 'static,
    {
        let store = self.clone();
        thread::spawn(move || callback(Ok(store.write(&path, &doc))))
    }

    /// Callback counterpart of [`FileStore::delete`]
    pub fn delete_with<F>(&self, path: PathBuf, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<bool>) + Send + 'static,
    {
        let store = self.clone();
        thread::spawn(move || callback(Ok(store.delete(&path))))
    }
}
