//! Configuration for a preferences instance

use std::path::PathBuf;
use std::sync::Arc;

use super::host::{AppDataDir, HostRuntime};
use crate::storage::JsonStorage;

/// Default file extension when only a base name is configured
pub const DEFAULT_FILE_EXT: &str = "json";

/// Default sub-path under the host runtime's data directory
pub const DEFAULT_EMBEDDING_FILE: &str = "Settings.json";

/// Configuration for initializing [`Preferences`](crate::Preferences)
///
/// The default preference file is derived from, in order of precedence:
///
/// 1. the host runtime's data directory joined with `embedding_file_path`,
///    when `use_embedding_storage` is set;
/// 2. `preference_file_dir` joined with the deprecated `preference_file_name`;
/// 3. `preference_file_dir` joined with `file_name.file_ext`.
///
/// If none applies the default path stays uninitialized until
/// [`Preferences::set_default_preference_file_path`](crate::Preferences::set_default_preference_file_path)
/// is called.
#[derive(Clone)]
pub struct PreferenceConfig {
    /// Base directory for the default file and for per-call override files
    pub preference_file_dir: Option<PathBuf>,

    /// Base name of the default file (e.g., "Settings")
    pub file_name: Option<String>,

    /// Extension of the default file, without the dot
    pub file_ext: String,

    /// Deprecated full file name; wins over `file_name`/`file_ext`
    pub preference_file_name: Option<String>,

    /// Derive the default path from the host runtime's data directory
    pub use_embedding_storage: bool,

    /// Sub-path under the host runtime's data directory
    pub embedding_file_path: Option<PathBuf>,

    /// Host runtime consulted in embedding mode
    pub host_runtime: Arc<dyn HostRuntime>,

    /// Storage backend implementation
    pub storage: JsonStorage,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            preference_file_dir: None,
            file_name: None,
            file_ext: DEFAULT_FILE_EXT.into(),
            preference_file_name: None,
            use_embedding_storage: false,
            embedding_file_path: None,
            host_runtime: Arc::new(AppDataDir::current()),
            storage: JsonStorage::new(),
        }
    }
}

impl std::fmt::Debug for PreferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceConfig")
            .field("preference_file_dir", &self.preference_file_dir)
            .field("file_name", &self.file_name)
            .field("file_ext", &self.file_ext)
            .field("preference_file_name", &self.preference_file_name)
            .field("use_embedding_storage", &self.use_embedding_storage)
            .field("embedding_file_path", &self.embedding_file_path)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl PreferenceConfig {
    /// Create a new builder for PreferenceConfig
    ///
    /// # Example
    /// ```rust
    /// use user_settings::PreferenceConfig;
    ///
    /// let config = PreferenceConfig::builder()
    ///     .preference_file_dir("~/.config/my-app")
    ///     .file_name("Settings")
    ///     .build();
    /// assert!(config.default_file_path().is_some());
    /// ```
    pub fn builder() -> PreferenceConfigBuilder {
        PreferenceConfigBuilder::new()
    }

    /// Configuration used by [`Preferences::defaults`](crate::Preferences::defaults):
    /// nothing but embedding storage under the current application's data directory
    pub fn embedded() -> Self {
        Self {
            use_embedding_storage: true,
            ..Self::default()
        }
    }

    /// The default file path derivable from the directory settings alone
    ///
    /// Returns `None` when the directory or the file name is missing. Embedding
    /// storage is not consulted here.
    pub fn default_file_path(&self) -> Option<PathBuf> {
        let dir = self.preference_file_dir.as_ref()?;
        if let Some(full_name) = &self.preference_file_name {
            return Some(dir.join(full_name));
        }
        let name = self.file_name.as_ref()?;
        let ext = if self.file_ext.is_empty() {
            DEFAULT_FILE_EXT
        } else {
            self.file_ext.as_str()
        };
        Some(dir.join(format!("{name}.{ext}")))
    }
}

/// Builder for creating PreferenceConfig with a fluent API
#[derive(Clone)]
pub struct PreferenceConfigBuilder {
    config: PreferenceConfig,
}

impl std::fmt::Debug for PreferenceConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl Default for PreferenceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceConfigBuilder {
    /// Create a new builder with no default path configured
    pub fn new() -> Self {
        Self {
            config: PreferenceConfig::default(),
        }
    }

    /// Set the preference directory
    ///
    /// Supports `~` expansion for home directory.
    pub fn preference_file_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let expanded = if path.starts_with("~") {
            if let Some(home) = dirs::home_dir() {
                home.join(path.strip_prefix("~").unwrap_or(&path))
            } else {
                path
            }
        } else {
            path
        };
        self.config.preference_file_dir = Some(expanded);
        self
    }

    /// Set the base name of the default file (e.g., "Settings")
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.config.file_name = Some(name.into());
        self
    }

    /// Set the extension of the default file (default: "json")
    ///
    /// A leading dot is ignored.
    pub fn file_ext(mut self, ext: impl Into<String>) -> Self {
        let ext: String = ext.into();
        self.config.file_ext = ext.trim_start_matches('.').to_string();
        self
    }

    /// Set the full default file name (e.g., "Settings.json")
    #[deprecated(note = "use `file_name` and `file_ext` instead")]
    pub fn preference_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.preference_file_name = Some(name.into());
        self
    }

    /// Derive the default path from the host runtime's data directory
    pub fn use_embedding_storage(mut self, enabled: bool) -> Self {
        self.config.use_embedding_storage = enabled;
        self
    }

    /// Set the sub-path under the host runtime's data directory
    pub fn embedding_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.embedding_file_path = Some(path.into());
        self
    }

    /// Replace the host runtime consulted in embedding mode
    pub fn host_runtime(mut self, runtime: impl HostRuntime + 'static) -> Self {
        self.config.host_runtime = Arc::new(runtime);
        self
    }

    /// Write pretty printed JSON instead of compact JSON
    pub fn pretty_json(mut self) -> Self {
        self.config.storage = JsonStorage::pretty();
        self
    }

    /// Build the PreferenceConfig
    pub fn build(self) -> PreferenceConfig {
        self.config
    }
}
