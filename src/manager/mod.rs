//! Main preferences module
//!
//! This module contains the [`Preferences`] struct, the entry point for
//! reading and writing preference files. Operations are split by calling
//! convention:
//!
//! - `blocking` - plain methods (`get_state`, `set_state`, ...)
//! - `nonblocking` - `*_async` methods returning futures (requires `async`)
//! - `callback` - `*_with` methods delivering a `Result` to a continuation
//!
//! Whatever the convention, argument and path errors are returned from the
//! call itself, and I/O errors are folded into the operation's result.

mod args;
mod blocking;
mod builder;
mod callback;
#[cfg(feature = "async")]
mod nonblocking;

pub use builder::PreferencesBuilder;
#[cfg(feature = "async")]
pub use nonblocking::BoxFuture;

use crate::config::PreferenceConfig;
use crate::error::Result;
use crate::resolver::PathResolver;
use crate::store::FileStore;

use log::info;
use std::path::{Path, PathBuf};

/// Key-value preferences persisted to a JSON file.
///
/// Every operation re-reads the file so external edits are always seen, and
/// every mutation rewrites the whole document. Concurrent writers race at the
/// file-system level: the last write wins for the whole document.
///
/// # Example
///
/// ```rust,no_run
/// use user_settings::Preferences;
///
/// let prefs = Preferences::builder()
///     .preference_file_dir("~/.config/my-app")
///     .file_name("Settings")
///     .build();
///
/// prefs.set_state("theme", "dark", None)?;
/// assert_eq!(prefs.get_state("theme", "light", None)?, "dark");
///
/// // Per-call override file, next to the default one
/// prefs.set_state("window", 3, Some("Window.json"))?;
/// # Ok::<(), user_settings::Error>(())
/// ```
#[derive(Debug)]
pub struct Preferences {
    /// Configuration
    config: PreferenceConfig,

    /// Default/optional path resolution and the sealed default path
    resolver: PathResolver,

    /// File access layer
    store: FileStore,
}

impl Preferences {
    /// Create a preferences instance with the given configuration.
    ///
    /// Nothing is touched on disk until the first operation.
    pub fn new(config: PreferenceConfig) -> Self {
        let resolver = PathResolver::new(&config);
        let store = FileStore::new(config.storage.clone());

        match resolver.sealed() {
            Some(sealed) => info!("Initialized preferences at: {}", sealed.path().display()),
            None => info!("Initialized preferences without a sealed default path"),
        }

        Self {
            config,
            resolver,
            store,
        }
    }

    /// Preferences backed by the running application's data directory.
    ///
    /// Embedding storage is enabled; the directory is only looked up when a
    /// path is first needed.
    pub fn defaults() -> Self {
        Self::new(PreferenceConfig::embedded())
    }

    /// Create a builder for a preferences instance.
    pub fn builder() -> PreferencesBuilder {
        PreferencesBuilder::new()
    }

    /// Get the configuration
    pub fn config(&self) -> &PreferenceConfig {
        &self.config
    }

    /// Get the file store
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Get the path resolver
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get the normalized default preference file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Initialization`](crate::Error::Initialization) if no
    /// default path could be derived.
    pub fn default_preference_file_path(&self) -> Result<PathBuf> {
        self.resolver.default_path()
    }

    /// Set the default preference file path, once.
    ///
    /// # Errors
    ///
    /// - [`Error::UnModifiableState`](crate::Error::UnModifiableState) if the
    ///   default path is already set
    /// - [`Error::IllegalState`](crate::Error::IllegalState) if `path` is not
    ///   an existing file
    pub fn set_default_preference_file_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.resolver.set_default_path(path)
    }

    /// The last optional file path used by any operation.
    ///
    /// For diagnostics during development; concurrent calls overwrite it.
    pub fn last_optional_file_path(&self) -> Option<PathBuf> {
        self.resolver.last_optional_path()
    }

    /// Whether the default path comes from the host runtime's data directory
    pub fn is_using_embedding_storage(&self) -> bool {
        self.resolver.is_using_embedding_storage()
    }

    /// Toggle embedding storage (no effect once the default path is sealed)
    pub fn set_use_embedding_storage(&self, enabled: bool) {
        self.resolver.set_use_embedding_storage(enabled);
    }

    /// Sub-path under the host runtime's data directory
    pub fn embedding_file_path(&self) -> PathBuf {
        self.resolver.embedding_file_path()
    }

    /// Set the sub-path under the host runtime's data directory
    pub fn set_embedding_file_path(&self, path: impl AsRef<Path>) {
        self.resolver.set_embedding_file_path(path);
    }

    /// Validate the optional file name and resolve the file to operate on
    fn prepare(&self, optional_file_name: Option<&str>) -> Result<PathBuf> {
        args::check_file_name(optional_file_name)?;
        self.resolver.resolve(optional_file_name)
    }
}
