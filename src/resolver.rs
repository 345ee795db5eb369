//! Preference file path resolution
//!
//! [`PathResolver`] owns the default preference file path of one
//! [`Preferences`](crate::Preferences) instance. The default path is sealed
//! the first time it is known, either at construction (directory
//! configuration), on first use (embedding storage), or through an explicit
//! [`PathResolver::set_default_path`] call. Once sealed it never changes.

use crate::config::{DEFAULT_EMBEDDING_FILE, HostRuntime, PreferenceConfig};
use crate::error::{Error, Result};
use crate::sync::RwLockExt;

use log::{debug, info, warn};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

/// A sealed default path and the parts derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPath {
    path: PathBuf,
    dir: PathBuf,
    file_name: String,
    file_ext: String,
}

impl SealedPath {
    fn from_path(path: &Path) -> Self {
        let dir = crate::storage::non_empty_parent(path)
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let file_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_ext = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            dir,
            file_name,
            file_ext,
        }
    }

    /// The default path, exactly as it was sealed
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the default file
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name without extension
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Extension without the leading dot (empty if none)
    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }
}

struct ResolverState {
    /// Configured base directory
    base_dir: Option<PathBuf>,
    /// Directory-derived default, used when embedding storage is off
    configured_path: Option<PathBuf>,
    use_embedding_storage: bool,
    embedding_file_path: PathBuf,
    last_optional: Option<PathBuf>,
}

/// Resolves the default and per-call preference file paths
pub struct PathResolver {
    sealed: OnceLock<SealedPath>,
    state: RwLock<ResolverState>,
    host_runtime: Arc<dyn HostRuntime>,
}

impl std::fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read_recovered();
        f.debug_struct("PathResolver")
            .field("sealed", &self.sealed.get())
            .field("base_dir", &state.base_dir)
            .field("use_embedding_storage", &state.use_embedding_storage)
            .field("embedding_file_path", &state.embedding_file_path)
            .finish_non_exhaustive()
    }
}

impl PathResolver {
    /// Create a resolver, sealing the default path right away when the
    /// directory configuration is complete and embedding storage is off
    pub fn new(config: &PreferenceConfig) -> Self {
        if config.preference_file_name.is_some() {
            warn!("preference_file_name is deprecated, use file_name and file_ext instead");
        }

        let configured_path = config.default_file_path();
        let sealed = OnceLock::new();
        if !config.use_embedding_storage {
            if let Some(path) = &configured_path {
                let _ = sealed.set(SealedPath::from_path(path));
                debug!("Default preference file: {}", path.display());
            }
        }

        let embedding_file_path = config
            .embedding_file_path
            .as_deref()
            .map_or_else(|| PathBuf::from(DEFAULT_EMBEDDING_FILE), normalize);

        Self {
            sealed,
            state: RwLock::new(ResolverState {
                base_dir: config.preference_file_dir.clone(),
                configured_path,
                use_embedding_storage: config.use_embedding_storage,
                embedding_file_path,
                last_optional: None,
            }),
            host_runtime: Arc::clone(&config.host_runtime),
        }
    }

    /// The sealed default path, if it has been sealed yet
    pub fn sealed(&self) -> Option<&SealedPath> {
        self.sealed.get()
    }

    /// Get the normalized default preference file path
    ///
    /// In embedding mode the path is derived (and sealed) on first call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Initialization`] if no default path can be derived,
    /// including when the host runtime is unavailable.
    pub fn default_path(&self) -> Result<PathBuf> {
        Ok(normalize(self.ensure_sealed()?.path()))
    }

    /// Seal the default path to an existing file
    ///
    /// Returns the path as given.
    ///
    /// # Errors
    ///
    /// - [`Error::UnModifiableState`] if a default path is already sealed
    /// - [`Error::IllegalState`] if `path` is not an existing regular file
    pub fn set_default_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        if let Some(existing) = self.sealed.get() {
            return Err(unmodifiable(existing));
        }

        let metadata = std::fs::metadata(path).map_err(|e| {
            Error::IllegalState(format!("{} is not an existing file: {e}", path.display()))
        })?;
        if !metadata.is_file() {
            return Err(Error::IllegalState(format!(
                "{} is an invalid path to a file",
                path.display()
            )));
        }

        self.sealed
            .set(SealedPath::from_path(path))
            .map_err(|_| Error::UnModifiableState("default path was set concurrently".into()))?;

        info!("Default preference file set to {}", path.display());
        Ok(path.to_path_buf())
    }

    /// Resolve the file an operation should use
    ///
    /// With `optional_file_name`, the name is joined onto the base directory
    /// and remembered as the last optional path. Without it, the default path
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Initialization`] if neither a base directory nor a
    /// default path is available.
    pub fn resolve(&self, optional_file_name: Option<&str>) -> Result<PathBuf> {
        let Some(name) = optional_file_name else {
            return self.default_path();
        };

        let base_dir = self.base_dir()?;
        let path = normalize(&join_relative(&base_dir, Path::new(name)));
        self.state.write_recovered().last_optional = Some(path.clone());
        Ok(path)
    }

    /// The last optional path resolved, for diagnostics only
    pub fn last_optional_path(&self) -> Option<PathBuf> {
        self.state.read_recovered().last_optional.clone()
    }

    /// Whether the default path comes from the host runtime
    pub fn is_using_embedding_storage(&self) -> bool {
        self.state.read_recovered().use_embedding_storage
    }

    /// Toggle embedding storage
    ///
    /// Only affects an instance whose default path is not sealed yet.
    pub fn set_use_embedding_storage(&self, enabled: bool) {
        if self.sealed.get().is_some() {
            debug!("Default path already sealed, embedding storage toggle has no effect");
        }
        self.state.write_recovered().use_embedding_storage = enabled;
    }

    /// Sub-path under the host runtime's data directory (normalized)
    pub fn embedding_file_path(&self) -> PathBuf {
        self.state.read_recovered().embedding_file_path.clone()
    }

    /// Set the sub-path under the host runtime's data directory
    ///
    /// Only affects an instance whose default path is not sealed yet.
    pub fn set_embedding_file_path(&self, path: impl AsRef<Path>) {
        self.state.write_recovered().embedding_file_path = normalize(path.as_ref());
    }

    fn ensure_sealed(&self) -> Result<&SealedPath> {
        if let Some(sealed) = self.sealed.get() {
            return Ok(sealed);
        }

        let derived = self.derive()?;
        if self.sealed.set(SealedPath::from_path(&derived)).is_ok() {
            debug!("Default preference file: {}", derived.display());
        }
        self.sealed
            .get()
            .ok_or_else(|| Error::Initialization("default path could not be sealed".into()))
    }

    fn derive(&self) -> Result<PathBuf> {
        let (use_embedding, embedding_file, configured) = {
            let state = self.state.read_recovered();
            (
                state.use_embedding_storage,
                state.embedding_file_path.clone(),
                state.configured_path.clone(),
            )
        };

        if use_embedding {
            let data_dir = self.host_runtime.user_data_dir().map_err(|e| {
                Error::Initialization(format!("embedding storage is unavailable: {e}"))
            })?;
            return Ok(join_relative(&data_dir, &embedding_file));
        }

        configured.ok_or_else(|| {
            Error::Initialization(
                "no preference file path was configured; set a directory and file name".into(),
            )
        })
    }

    fn base_dir(&self) -> Result<PathBuf> {
        if let Some(sealed) = self.sealed.get() {
            return Ok(sealed.dir().to_path_buf());
        }
        if let Some(dir) = self.state.read_recovered().base_dir.clone() {
            return Ok(dir);
        }
        Ok(self.ensure_sealed()?.dir().to_path_buf())
    }
}

fn unmodifiable(existing: &SealedPath) -> Error {
    Error::UnModifiableState(format!(
        "default preference file path is already set to {} and cannot be changed",
        existing.path().display()
    ))
}

/// Join `sub` under `base`, ignoring any root or prefix on `sub`
///
/// `join_relative("/data", "/settings.json")` is `/data/settings.json`.
pub fn join_relative(base: &Path, sub: &Path) -> PathBuf {
    let mut joined = base.to_path_buf();
    for component in sub.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => joined.push(other.as_os_str()),
        }
    }
    joined
}

/// Lexically normalize a path: drop `.` and fold `..` into its parent
///
/// Does not touch the filesystem or follow symlinks. `..` never climbs above
/// a root, and leading `..` of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}
