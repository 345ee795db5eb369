//! Host runtime collaborator
//!
//! When embedding storage is enabled the default preference file lives under
//! the per-user data directory of the application that embeds this crate.
//! Looking that directory up is the host's business; the resolver only asks
//! for it when a path is actually needed.

use std::io;
use std::path::PathBuf;

/// Source of the per-user data directory of the embedding application
pub trait HostRuntime: Send + Sync {
    /// Absolute per-user data directory for the current application
    ///
    /// # Errors
    ///
    /// Returns an error if the host runtime is unavailable.
    fn user_data_dir(&self) -> io::Result<PathBuf>;
}

impl<F> HostRuntime for F
where
    F: Fn() -> io::Result<PathBuf> + Send + Sync,
{
    fn user_data_dir(&self) -> io::Result<PathBuf> {
        self()
    }
}

/// Platform data directory of a named application
///
/// - **Linux:** `$XDG_DATA_HOME/<app>` or `~/.local/share/<app>`
/// - **macOS:** `~/Library/Application Support/<app>`
/// - **Windows:** `%APPDATA%\<app>`
#[derive(Debug, Clone)]
pub struct AppDataDir {
    app_name: String,
}

impl AppDataDir {
    /// Data directory for `app_name`
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Data directory named after the running executable
    pub fn current() -> Self {
        let app_name = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "app".to_string());
        Self::new(app_name)
    }

    /// The application name used as the last path component
    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

impl HostRuntime for AppDataDir {
    fn user_data_dir(&self) -> io::Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(&self.app_name))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "no per-user data directory on this platform",
                )
            })
    }
}
