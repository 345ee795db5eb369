//! Builder for Preferences
//!
//! [`PreferencesBuilder`] wraps a
//! [`PreferenceConfigBuilder`](crate::config::PreferenceConfigBuilder) so a
//! [`Preferences`](super::Preferences) instance can be configured in one chain.

use crate::config::{HostRuntime, PreferenceConfigBuilder};
use std::path::PathBuf;

use super::Preferences;

/// Builder for creating [`Preferences`] with a fluent API.
///
/// # Example
///
/// ```rust,no_run
/// use user_settings::Preferences;
///
/// let prefs = Preferences::builder()
///     .preference_file_dir("~/.config/my-app")
///     .file_name("Settings")
///     .file_ext("json")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct PreferencesBuilder {
    config_builder: PreferenceConfigBuilder,
}

impl PreferencesBuilder {
    /// Create a new builder with no default path configured.
    pub fn new() -> Self {
        Self {
            config_builder: PreferenceConfigBuilder::new(),
        }
    }

    /// Set the preference directory.
    ///
    /// Supports `~` expansion for home directory.
    pub fn preference_file_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.preference_file_dir(path);
        self
    }

    /// Set the base name of the default file.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.file_name(name);
        self
    }

    /// Set the extension of the default file (default: "json").
    pub fn file_ext(mut self, ext: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.file_ext(ext);
        self
    }

    /// Set the full default file name.
    #[deprecated(note = "use `file_name` and `file_ext` instead")]
    #[allow(deprecated)]
    pub fn preference_file_name(mut self, name: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.preference_file_name(name);
        self
    }

    /// Derive the default path from the host runtime's data directory.
    pub fn use_embedding_storage(mut self, enabled: bool) -> Self {
        self.config_builder = self.config_builder.use_embedding_storage(enabled);
        self
    }

    /// Set the sub-path under the host runtime's data directory.
    pub fn embedding_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.embedding_file_path(path);
        self
    }

    /// Replace the host runtime consulted in embedding mode.
    pub fn host_runtime(mut self, runtime: impl HostRuntime + 'static) -> Self {
        self.config_builder = self.config_builder.host_runtime(runtime);
        self
    }

    /// Write pretty printed JSON.
    pub fn pretty_json(mut self) -> Self {
        self.config_builder = self.config_builder.pretty_json();
        self
    }

    /// Build the [`Preferences`].
    pub fn build(self) -> Preferences {
        Preferences::new(self.config_builder.build())
    }
}
